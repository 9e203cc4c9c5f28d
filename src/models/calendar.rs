use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SATURDAY_LABEL: &str = "Saturday";
pub const SUNDAY_LABEL: &str = "Sunday";

/// One labeled entry of the composite calendar. Ordinary weekdays are not
/// represented; only holidays and weekend days appear in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub label: String,
}

impl CalendarDay {
    pub fn holiday(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            label: name.to_string(),
        }
    }

    pub fn saturday(date: NaiveDate) -> Self {
        Self {
            date,
            label: SATURDAY_LABEL.to_string(),
        }
    }

    pub fn sunday(date: NaiveDate) -> Self {
        Self {
            date,
            label: SUNDAY_LABEL.to_string(),
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named calendar date maintained by an administrator.
///
/// `is_fixed_date` marks a holiday that recurs on the same month/day every
/// year (e.g. New Year); a non-fixed holiday is valid only for the stored
/// date (movable feasts get one row per year).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub is_fixed_date: bool,
    pub sequence_no: i64,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl PublicHoliday {
    pub fn new(name: String, date: NaiveDate, is_fixed_date: bool, sequence_no: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            date,
            name,
            is_fixed_date,
            sequence_no,
            version: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Join row linking a holiday to a state that observes it. At most one row
/// exists per (holiday, state) pair; a missing row means "not observed".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateHoliday {
    pub id: String,
    pub public_holiday_id: String,
    pub state_id: String,
    pub is_holiday: bool,
}

impl StateHoliday {
    pub fn new(public_holiday_id: String, state_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            public_holiday_id,
            state_id,
            is_holiday: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHolidayRequest {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_fixed_date: bool,
    pub sequence_no: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHolidayRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_fixed_date: Option<bool>,
    pub sequence_no: Option<i64>,
    /// Version the client read; stale writes are rejected with a conflict.
    pub version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StateSelectionRequest {
    pub state_ids: Vec<String>,
}

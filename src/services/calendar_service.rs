use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    api::error::{ApiError, ApiResult},
    database::Database,
    models::{CalendarDay, PublicHoliday},
};

/// Produces the composite holiday/weekend calendar over arbitrary ranges.
/// The classification itself is a pure transformation; the only I/O is the
/// initial holiday lookup.
#[derive(Clone)]
pub struct CalendarService {
    db: Arc<Database>,
}

impl CalendarService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Day-by-day classification of `[start, end]`: holidays, Saturdays and
    /// Sundays, in calendar order. Ordinary weekdays are omitted.
    pub async fn calendar_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<Vec<CalendarDay>> {
        validate_range(start, end)?;

        let exact = self.db.holidays_between(start, end).await?;
        let fixed = self.db.fixed_holidays().await?;
        let holidays = merge_holiday_map(&exact, &fixed, start, end);

        Ok(classify_range(start, end, &holidays))
    }

    pub async fn calendar_for_year(&self, year: i32) -> ApiResult<Vec<CalendarDay>> {
        let (start, end) = year_bounds(year)?;
        self.calendar_between(start, end).await
    }

    /// Pure weekend overlay: Saturdays and Sundays only, holidays ignored.
    pub fn weekends_between(&self, start: NaiveDate, end: NaiveDate) -> ApiResult<Vec<CalendarDay>> {
        validate_range(start, end)?;
        Ok(weekend_overlay(start, end))
    }

    pub fn weekends_for_year(&self, year: i32) -> ApiResult<Vec<CalendarDay>> {
        let (start, end) = year_bounds(year)?;
        self.weekends_between(start, end)
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> ApiResult<()> {
    if start > end {
        return Err(ApiError::BadRequest(
            "Start date cannot be after end date".to_string(),
        ));
    }
    Ok(())
}

fn year_bounds(year: i32) -> ApiResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid year: {}", year)))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid year: {}", year)))?;
    Ok((start, end))
}

/// Build the date -> holiday-name map for a range.
///
/// Exact-date rows win over fixed-date projections. Within each group the
/// first insert wins, so feeding rows in ascending id order makes a
/// duplicate-date collision resolve deterministically to the lowest id.
fn merge_holiday_map(
    exact: &[PublicHoliday],
    fixed: &[PublicHoliday],
    start: NaiveDate,
    end: NaiveDate,
) -> HashMap<NaiveDate, String> {
    let mut map: HashMap<NaiveDate, String> = HashMap::new();

    for holiday in exact {
        map.entry(holiday.date).or_insert_with(|| holiday.name.clone());
    }

    let mut fixed_by_id: Vec<&PublicHoliday> = fixed.iter().collect();
    fixed_by_id.sort_by(|a, b| a.id.cmp(&b.id));

    for year in start.year()..=end.year() {
        for holiday in &fixed_by_id {
            // Feb 29 projections into non-leap years have no valid date
            let projected =
                NaiveDate::from_ymd_opt(year, holiday.date.month(), holiday.date.day());

            if let Some(date) = projected {
                if date >= start && date <= end {
                    map.entry(date).or_insert_with(|| holiday.name.clone());
                }
            }
        }
    }

    map
}

fn classify_range(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HashMap<NaiveDate, String>,
) -> Vec<CalendarDay> {
    let mut days = Vec::new();
    let mut current = start;

    while current <= end {
        if let Some(name) = holidays.get(&current) {
            days.push(CalendarDay::holiday(current, name));
        } else {
            match current.weekday() {
                Weekday::Sat => days.push(CalendarDay::saturday(current)),
                Weekday::Sun => days.push(CalendarDay::sunday(current)),
                _ => {}
            }
        }

        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

fn weekend_overlay(start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
    let mut days = Vec::new();
    let mut current = start;

    while current <= end {
        match current.weekday() {
            Weekday::Sat => days.push(CalendarDay::saturday(current)),
            Weekday::Sun => days.push(CalendarDay::sunday(current)),
            _ => {}
        }

        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SATURDAY_LABEL, SUNDAY_LABEL};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holiday(id: &str, name: &str, on: NaiveDate, fixed: bool) -> PublicHoliday {
        PublicHoliday {
            id: id.to_string(),
            date: on,
            name: name.to_string(),
            is_fixed_date: fixed,
            sequence_no: 0,
            version: 1,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_classify_week_with_holiday() {
        // 2024-01-01 is a Monday
        let new_year = holiday("a", "New Year", date(2024, 1, 1), false);
        let map = merge_holiday_map(&[new_year], &[], date(2024, 1, 1), date(2024, 1, 7));

        let days = classify_range(date(2024, 1, 1), date(2024, 1, 7), &map);

        assert_eq!(
            days,
            vec![
                CalendarDay::holiday(date(2024, 1, 1), "New Year"),
                CalendarDay::saturday(date(2024, 1, 6)),
                CalendarDay::sunday(date(2024, 1, 7)),
            ]
        );
    }

    #[test]
    fn test_ordinary_weekdays_are_omitted() {
        let days = classify_range(date(2024, 1, 2), date(2024, 1, 5), &HashMap::new());
        assert!(days.is_empty());
    }

    #[test]
    fn test_holiday_on_weekend_keeps_holiday_label() {
        // 2024-01-06 is a Saturday
        let h = holiday("a", "Epiphany", date(2024, 1, 6), false);
        let map = merge_holiday_map(&[h], &[], date(2024, 1, 6), date(2024, 1, 6));

        let days = classify_range(date(2024, 1, 6), date(2024, 1, 6), &map);
        assert_eq!(days, vec![CalendarDay::holiday(date(2024, 1, 6), "Epiphany")]);
    }

    #[test]
    fn test_each_date_appears_at_most_once() {
        let h = holiday("a", "New Year", date(2024, 1, 1), true);
        let map = merge_holiday_map(&[h.clone()], &[h], date(2024, 1, 1), date(2024, 12, 31));

        let days = classify_range(date(2024, 1, 1), date(2024, 12, 31), &map);

        let mut seen = std::collections::HashSet::new();
        for day in &days {
            assert!(seen.insert(day.date), "date {} appeared twice", day.date);
        }
    }

    #[test]
    fn test_duplicate_date_resolves_to_lowest_id() {
        let first = holiday("aaa", "First", date(2024, 5, 1), false);
        let second = holiday("bbb", "Second", date(2024, 5, 1), false);

        // holidays_between returns rows ordered by (date, id)
        let map = merge_holiday_map(
            &[first, second],
            &[],
            date(2024, 5, 1),
            date(2024, 5, 1),
        );

        assert_eq!(map.get(&date(2024, 5, 1)), Some(&"First".to_string()));
    }

    #[test]
    fn test_fixed_holiday_projects_into_every_year() {
        let h = holiday("a", "New Year", date(2023, 1, 1), true);
        let map = merge_holiday_map(&[], &[h], date(2024, 1, 1), date(2026, 12, 31));

        assert_eq!(map.get(&date(2024, 1, 1)), Some(&"New Year".to_string()));
        assert_eq!(map.get(&date(2025, 1, 1)), Some(&"New Year".to_string()));
        assert_eq!(map.get(&date(2026, 1, 1)), Some(&"New Year".to_string()));
    }

    #[test]
    fn test_exact_date_wins_over_fixed_projection() {
        let exact = holiday("b", "Observed Holiday", date(2024, 1, 1), false);
        let fixed = holiday("a", "New Year", date(2023, 1, 1), true);

        let map = merge_holiday_map(&[exact], &[fixed], date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(
            map.get(&date(2024, 1, 1)),
            Some(&"Observed Holiday".to_string())
        );
    }

    #[test]
    fn test_leap_day_projection_skips_non_leap_years() {
        let h = holiday("a", "Leap Day", date(2024, 2, 29), true);
        let map = merge_holiday_map(&[], &[h], date(2025, 1, 1), date(2025, 12, 31));

        assert!(map.is_empty());
    }

    #[test]
    fn test_weekend_overlay_ignores_holidays() {
        let days = weekend_overlay(date(2024, 1, 1), date(2024, 1, 7));
        assert_eq!(
            days,
            vec![
                CalendarDay::saturday(date(2024, 1, 6)),
                CalendarDay::sunday(date(2024, 1, 7)),
            ]
        );
        assert_eq!(days[0].label, SATURDAY_LABEL);
        assert_eq!(days[1].label, SUNDAY_LABEL);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = validate_range(date(2024, 1, 2), date(2024, 1, 1));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        assert!(validate_range(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }
}

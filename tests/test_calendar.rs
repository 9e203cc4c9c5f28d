mod helpers;

use chrono::NaiveDate;
use helpers::*;
use std::collections::HashSet;
use std::sync::Arc;

use workdesk::api::error::ApiError;
use workdesk::models::{CreateHolidayRequest, PublicHoliday, SATURDAY_LABEL, SUNDAY_LABEL};
use workdesk::services::{CalendarService, HolidayService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn create_holiday(
    db: &Arc<workdesk::database::Database>,
    name: &str,
    on: NaiveDate,
    fixed: bool,
) -> PublicHoliday {
    let service = HolidayService::new(db.clone());
    service
        .create_holiday(CreateHolidayRequest {
            name: name.to_string(),
            date: on,
            is_fixed_date: fixed,
            sequence_no: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_year_calendar_lists_holidays_and_weekends() {
    let db = setup_test_db().await;
    create_holiday(&db, "New Year", date(2024, 1, 1), false).await;

    let calendar = CalendarService::new(db.clone());
    let days = calendar.calendar_for_year(2024).await.unwrap();

    let on = |d: NaiveDate| days.iter().find(|day| day.date == d);

    assert_eq!(on(date(2024, 1, 1)).unwrap().label, "New Year");
    assert_eq!(on(date(2024, 1, 6)).unwrap().label, SATURDAY_LABEL);
    assert_eq!(on(date(2024, 1, 7)).unwrap().label, SUNDAY_LABEL);
    // Ordinary Tuesday is omitted
    assert!(on(date(2024, 1, 2)).is_none());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_calendar_is_idempotent() {
    let db = setup_test_db().await;
    create_holiday(&db, "New Year", date(2024, 1, 1), false).await;
    create_holiday(&db, "Labour Day", date(2024, 5, 1), false).await;

    let calendar = CalendarService::new(db.clone());
    let first = calendar.calendar_for_year(2024).await.unwrap();
    let second = calendar.calendar_for_year(2024).await.unwrap();

    assert_eq!(first, second);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_no_date_appears_twice_in_a_year() {
    let db = setup_test_db().await;
    // A holiday landing on a Saturday must not also show up as a weekend
    create_holiday(&db, "Epiphany", date(2024, 1, 6), false).await;

    let calendar = CalendarService::new(db.clone());
    let days = calendar.calendar_for_year(2024).await.unwrap();

    let mut seen = HashSet::new();
    for day in &days {
        assert!(seen.insert(day.date), "date {} appeared twice", day.date);
    }
    assert_eq!(
        days.iter().find(|d| d.date == date(2024, 1, 6)).unwrap().label,
        "Epiphany"
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let db = setup_test_db().await;
    let calendar = CalendarService::new(db.clone());

    let result = calendar
        .calendar_between(date(2024, 2, 1), date(2024, 1, 1))
        .await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    let result = calendar.weekends_between(date(2024, 2, 1), date(2024, 1, 1));
    assert!(matches!(result, Err(ApiError::BadRequest(_))));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_weekend_overlay_ignores_holidays() {
    let db = setup_test_db().await;
    // 2024-01-06 is a Saturday with a holiday on it
    create_holiday(&db, "Epiphany", date(2024, 1, 6), false).await;

    let calendar = CalendarService::new(db.clone());
    let days = calendar
        .weekends_between(date(2024, 1, 1), date(2024, 1, 7))
        .unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date(2024, 1, 6));
    assert_eq!(days[0].label, SATURDAY_LABEL);
    assert_eq!(days[1].date, date(2024, 1, 7));
    assert_eq!(days[1].label, SUNDAY_LABEL);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_duplicate_date_holidays_emit_single_deterministic_entry() {
    let db = setup_test_db().await;

    // Two rows stored on the same date; the lowest id must win
    let first = PublicHoliday {
        id: "aaa-holiday".to_string(),
        ..PublicHoliday::new("First".to_string(), date(2024, 5, 1), false, 1)
    };
    let second = PublicHoliday {
        id: "bbb-holiday".to_string(),
        ..PublicHoliday::new("Second".to_string(), date(2024, 5, 1), false, 2)
    };
    db.create_public_holiday(&first).await.unwrap();
    db.create_public_holiday(&second).await.unwrap();

    let calendar = CalendarService::new(db.clone());
    let days = calendar
        .calendar_between(date(2024, 5, 1), date(2024, 5, 1))
        .await
        .unwrap();

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].label, "First");

    // Deterministic across runs
    let again = calendar
        .calendar_between(date(2024, 5, 1), date(2024, 5, 1))
        .await
        .unwrap();
    assert_eq!(days, again);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_fixed_date_holiday_recurs_in_later_years() {
    let db = setup_test_db().await;
    create_holiday(&db, "Labour Day", date(2024, 5, 1), true).await;

    let calendar = CalendarService::new(db.clone());
    let days = calendar.calendar_for_year(2026).await.unwrap();

    let labour_day = days.iter().find(|d| d.date == date(2026, 5, 1)).unwrap();
    assert_eq!(labour_day.label, "Labour Day");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_non_fixed_holiday_does_not_recur() {
    let db = setup_test_db().await;
    // Movable feast: one row per year only
    create_holiday(&db, "Easter Monday", date(2024, 4, 1), false).await;

    let calendar = CalendarService::new(db.clone());
    let days = calendar.calendar_for_year(2025).await.unwrap();

    assert!(days.iter().all(|d| d.label != "Easter Monday"));

    teardown_test_db(db).await;
}

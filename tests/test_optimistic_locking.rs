mod helpers;

use chrono::NaiveDate;
use helpers::*;

use workdesk::api::error::ApiError;
use workdesk::models::{
    CreateAbsenceRequest, CreateHolidayRequest, UpdateAbsenceRequest, UpdateHolidayRequest,
};
use workdesk::services::HolidayService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn no_changes() -> UpdateAbsenceRequest {
    UpdateAbsenceRequest {
        absence_date: None,
        employee_id: None,
        absence_type_id: None,
        version: None,
    }
}

#[tokio::test]
async fn test_successful_update_bumps_the_version() {
    let db = setup_test_db().await;
    let service = build_absence_service(&db);

    let absence = service
        .create_absence(CreateAbsenceRequest {
            absence_date: Some(date(2024, 3, 5)),
            employee_id: Some("emp-001".to_string()),
            absence_type_id: Some("type-vacation".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(absence.version, 1);

    let updated = service
        .update_absence(
            &absence.id,
            UpdateAbsenceRequest {
                absence_type_id: Some("type-sick".to_string()),
                ..no_changes()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.version, 2);

    let stored = service.get_absence(&absence.id).await.unwrap();
    assert_eq!(stored.version, 2);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_second_writer_with_stale_version_conflicts() {
    let db = setup_test_db().await;
    let service = build_absence_service(&db);

    let absence = service
        .create_absence(CreateAbsenceRequest {
            absence_date: Some(date(2024, 3, 5)),
            employee_id: Some("emp-001".to_string()),
            absence_type_id: Some("type-vacation".to_string()),
        })
        .await
        .unwrap();

    // Both writers read version 1. The first write wins...
    let first = service
        .update_absence(
            &absence.id,
            UpdateAbsenceRequest {
                absence_type_id: Some("type-sick".to_string()),
                version: Some(absence.version),
                ..no_changes()
            },
        )
        .await
        .unwrap();
    assert_eq!(first.version, 2);

    // ...the second must be told to refresh and retry
    let second = service
        .update_absence(
            &absence.id,
            UpdateAbsenceRequest {
                absence_type_id: Some("type-half-day".to_string()),
                version: Some(absence.version),
                ..no_changes()
            },
        )
        .await;

    match second {
        Err(ApiError::Conflict(msg)) => assert!(msg.contains("refresh"), "got: {}", msg),
        other => panic!("expected Conflict, got {:?}", other.map(|a| a.version)),
    }

    // The losing write must not have clobbered the winner
    let stored = service.get_absence(&absence.id).await.unwrap();
    assert_eq!(stored.absence_type_id, "type-sick");

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_update_without_explicit_version_uses_the_stored_one() {
    let db = setup_test_db().await;
    let service = build_absence_service(&db);

    let absence = service
        .create_absence(CreateAbsenceRequest {
            absence_date: Some(date(2024, 3, 5)),
            employee_id: Some("emp-001".to_string()),
            absence_type_id: Some("type-vacation".to_string()),
        })
        .await
        .unwrap();

    // Two sequential updates without a client-supplied version both succeed
    for absence_type in ["type-sick", "type-half-day"] {
        service
            .update_absence(
                &absence.id,
                UpdateAbsenceRequest {
                    absence_type_id: Some(absence_type.to_string()),
                    ..no_changes()
                },
            )
            .await
            .unwrap();
    }

    let stored = service.get_absence(&absence.id).await.unwrap();
    assert_eq!(stored.version, 3);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_stale_holiday_update_conflicts() {
    let db = setup_test_db().await;
    let service = HolidayService::new(db.clone());

    let holiday = service
        .create_holiday(CreateHolidayRequest {
            name: "Labour Day".to_string(),
            date: date(2024, 5, 1),
            is_fixed_date: true,
            sequence_no: None,
        })
        .await
        .unwrap();

    let updated = service
        .update_holiday(
            &holiday.id,
            UpdateHolidayRequest {
                name: Some("May Day".to_string()),
                date: None,
                is_fixed_date: None,
                sequence_no: None,
                version: Some(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.version, 2);

    let stale = service
        .update_holiday(
            &holiday.id,
            UpdateHolidayRequest {
                name: Some("International Workers' Day".to_string()),
                date: None,
                is_fixed_date: None,
                sequence_no: None,
                version: Some(1),
            },
        )
        .await;
    assert!(matches!(stale, Err(ApiError::Conflict(_))));

    let stored = service.get_holiday(&holiday.id).await.unwrap();
    assert_eq!(stored.name, "May Day");

    teardown_test_db(db).await;
}

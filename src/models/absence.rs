use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AbsenceType;

/// One employee's absence on one calendar date.
///
/// Two invariants hold at all times: an employee has at most one record per
/// date, and the date is never classified as a public holiday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceDay {
    pub id: String,
    pub absence_date: NaiveDate,
    pub absence_type_id: String,
    pub employee_id: String,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AbsenceDay {
    pub fn new(absence_date: NaiveDate, absence_type_id: String, employee_id: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            absence_date,
            absence_type_id,
            employee_id,
            version: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Booking request. Fields are optional so the service can report which one
/// is missing instead of failing at the deserialization boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAbsenceRequest {
    pub absence_date: Option<NaiveDate>,
    pub employee_id: Option<String>,
    pub absence_type_id: Option<String>,
}

/// Partial update; only provided fields are changed. Holiday and duplicate
/// checks re-run only when the governing field actually changes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAbsenceRequest {
    pub absence_date: Option<NaiveDate>,
    pub employee_id: Option<String>,
    pub absence_type_id: Option<String>,
    /// Version the client read; stale writes are rejected with a conflict.
    pub version: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbsenceFilter {
    pub employee_id: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub absence_type_id: Option<String>,
    pub year: Option<i32>,
}

/// Aggregation row: how many absence days an employee has per type.
#[derive(Debug, Clone, Serialize)]
pub struct AbsenceTypeCount {
    pub absence_type: AbsenceType,
    pub count: i64,
}

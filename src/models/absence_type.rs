use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of absence (vacation, sick leave, ...). Reference data.
///
/// `share_of_day` is the fraction of a working day the type consumes
/// (0.5 for a half day). `is_holiday` marks types that count like a
/// public holiday in hour accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceType {
    pub id: String,
    pub name: String,
    pub label: String,
    pub hours: f64,
    pub is_holiday: bool,
    pub share_of_day: f64,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AbsenceType {
    pub fn new(name: String, label: String, hours: f64, is_holiday: bool, share_of_day: f64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            label,
            hours,
            is_holiday,
            share_of_day,
            version: 1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAbsenceTypeRequest {
    pub name: String,
    pub label: String,
    #[serde(default = "default_hours")]
    pub hours: f64,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default = "default_share_of_day")]
    pub share_of_day: f64,
}

fn default_hours() -> f64 {
    8.0
}

fn default_share_of_day() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct UpdateAbsenceTypeRequest {
    pub name: Option<String>,
    pub label: Option<String>,
    pub hours: Option<f64>,
    pub is_holiday: Option<bool>,
    pub share_of_day: Option<f64>,
    pub version: Option<i64>,
}

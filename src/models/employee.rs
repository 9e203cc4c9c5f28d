use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal employee record. The absence core only needs enough to resolve
/// a reference and render a name; the full personnel file lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_no: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Employee {
    pub fn new(
        first_name: String,
        last_name: String,
        employee_no: Option<i64>,
        email: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            employee_no,
            first_name,
            last_name,
            email,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

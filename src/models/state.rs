use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A federal state (Bundesland). Reference data, seeded at setup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl State {
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// One row of the selection view: the full state catalog annotated with
/// whether each state observes a given holiday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSelection {
    pub state_id: String,
    pub state_name: String,
    pub selected: bool,
}

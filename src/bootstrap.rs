use std::sync::Arc;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::database::Database;
use crate::domain::ports::{AbsenceTypeLookup, EmployeeLookup};
use crate::models::State;
use crate::services::{AbsenceService, AbsenceTypeService, CalendarService, HolidayService};

/// The sixteen German federal states. Inserted once, when the catalog is
/// empty; the list is reference data and never mutated afterwards.
const STATE_NAMES: [&str; 16] = [
    "Baden-Wuerttemberg",
    "Bavaria",
    "Berlin",
    "Brandenburg",
    "Bremen",
    "Hamburg",
    "Hesse",
    "Lower Saxony",
    "Mecklenburg-Western Pomerania",
    "North Rhine-Westphalia",
    "Rhineland-Palatinate",
    "Saarland",
    "Saxony",
    "Saxony-Anhalt",
    "Schleswig-Holstein",
    "Thuringia",
];

/// Seed the state catalog if it is empty.
pub async fn seed_states(db: &Database) -> ApiResult<()> {
    if db.count_states().await? > 0 {
        return Ok(());
    }

    for name in STATE_NAMES {
        db.create_state(&State::new(name.to_string())).await?;
    }

    tracing::info!("Seeded {} states", STATE_NAMES.len());

    Ok(())
}

pub fn build_app_state(db: Database) -> AppState {
    let db = Arc::new(db);

    let calendar_service = CalendarService::new(db.clone());
    let holiday_service = HolidayService::new(db.clone());
    let absence_type_service = AbsenceTypeService::new(db.clone());
    let absence_service = AbsenceService::new(
        db.clone(),
        db.clone() as Arc<dyn EmployeeLookup>,
        db.clone() as Arc<dyn AbsenceTypeLookup>,
    );

    AppState {
        db,
        calendar_service,
        holiday_service,
        absence_service,
        absence_type_service,
    }
}

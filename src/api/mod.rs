pub mod absence_types;
pub mod absences;
pub mod calendar;
pub mod employees;
pub mod error;
pub mod holidays;
pub mod states;

pub use error::{ApiError, ApiResult};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    database::Database,
    services::{AbsenceService, AbsenceTypeService, CalendarService, HolidayService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub calendar_service: CalendarService,
    pub holiday_service: HolidayService,
    pub absence_service: AbsenceService,
    pub absence_type_service: AbsenceTypeService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calendar", get(calendar::get_calendar))
        .route(
            "/api/calendar/year/:year",
            get(calendar::get_calendar_for_year),
        )
        .route("/api/calendar/weekends", get(calendar::get_weekends))
        .route(
            "/api/calendar/weekends/year/:year",
            get(calendar::get_weekends_for_year),
        )
        .route(
            "/api/holidays",
            get(holidays::list_holidays).post(holidays::create_holiday),
        )
        .route(
            "/api/holidays/next-sequence",
            get(holidays::next_sequence_no),
        )
        .route(
            "/api/holidays/:id",
            get(holidays::get_holiday)
                .put(holidays::update_holiday)
                .delete(holidays::delete_holiday),
        )
        .route(
            "/api/holidays/:id/states",
            get(holidays::get_state_selection).put(holidays::save_state_selection),
        )
        .route("/api/states", get(states::list_states))
        .route("/api/states/:id", get(states::get_state))
        .route(
            "/api/absence-types",
            get(absence_types::list_absence_types).post(absence_types::create_absence_type),
        )
        .route(
            "/api/absence-types/:id",
            get(absence_types::get_absence_type)
                .put(absence_types::update_absence_type)
                .delete(absence_types::delete_absence_type),
        )
        .route(
            "/api/absences",
            get(absences::list_absences).post(absences::create_absence),
        )
        .route("/api/absences/bulk", post(absences::create_absences_bulk))
        .route("/api/absences/counts", get(absences::count_absences_by_type))
        .route(
            "/api/absences/:id",
            get(absences::get_absence)
                .put(absences::update_absence)
                .delete(absences::delete_absence),
        )
        .route("/api/employees", get(employees::list_employees))
        .route("/api/employees/:id", get(employees::get_employee))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

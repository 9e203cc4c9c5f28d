use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::{ApiResult, AppState},
    models::{
        AbsenceDay, AbsenceFilter, AbsenceTypeCount, CreateAbsenceRequest, UpdateAbsenceRequest,
    },
};

/// POST /api/absences - Book an absence day
pub async fn create_absence(
    State(state): State<AppState>,
    Json(req): Json<CreateAbsenceRequest>,
) -> ApiResult<Json<AbsenceDay>> {
    let absence = state.absence_service.create_absence(req).await?;

    Ok(Json(absence))
}

/// POST /api/absences/bulk - Book several absence days atomically
pub async fn create_absences_bulk(
    State(state): State<AppState>,
    Json(reqs): Json<Vec<CreateAbsenceRequest>>,
) -> ApiResult<Json<Vec<AbsenceDay>>> {
    let absences = state.absence_service.create_absences_bulk(reqs).await?;

    Ok(Json(absences))
}

/// GET /api/absences - List absences for an employee, optionally filtered
/// by date range, year or absence type
pub async fn list_absences(
    State(state): State<AppState>,
    Query(filter): Query<AbsenceFilter>,
) -> ApiResult<Json<Vec<AbsenceDay>>> {
    let absences = state.absence_service.list_absences(filter).await?;

    Ok(Json(absences))
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub employee_id: String,
    pub year: Option<i32>,
}

/// GET /api/absences/counts - Absence-day counts per type for an employee
pub async fn count_absences_by_type(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> ApiResult<Json<Vec<AbsenceTypeCount>>> {
    let counts = state
        .absence_service
        .count_absences_by_type(&query.employee_id, query.year)
        .await?;

    Ok(Json(counts))
}

/// GET /api/absences/:id - Get absence by ID
pub async fn get_absence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AbsenceDay>> {
    let absence = state.absence_service.get_absence(&id).await?;

    Ok(Json(absence))
}

/// PUT /api/absences/:id - Update absence (partial)
pub async fn update_absence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAbsenceRequest>,
) -> ApiResult<Json<AbsenceDay>> {
    let absence = state.absence_service.update_absence(&id, req).await?;

    Ok(Json(absence))
}

/// DELETE /api/absences/:id - Delete absence by ID
pub async fn delete_absence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.absence_service.delete_absence(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

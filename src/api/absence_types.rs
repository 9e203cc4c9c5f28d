use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{ApiResult, AppState},
    models::{AbsenceType, CreateAbsenceTypeRequest, UpdateAbsenceTypeRequest},
};

/// POST /api/absence-types - Create an absence type
pub async fn create_absence_type(
    State(state): State<AppState>,
    Json(req): Json<CreateAbsenceTypeRequest>,
) -> ApiResult<Json<AbsenceType>> {
    let absence_type = state.absence_type_service.create(req).await?;

    Ok(Json(absence_type))
}

/// GET /api/absence-types - List absence types
pub async fn list_absence_types(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AbsenceType>>> {
    let types = state.absence_type_service.list().await?;

    Ok(Json(types))
}

/// GET /api/absence-types/:id - Get absence type by ID
pub async fn get_absence_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AbsenceType>> {
    let absence_type = state.absence_type_service.get(&id).await?;

    Ok(Json(absence_type))
}

/// PUT /api/absence-types/:id - Update absence type
pub async fn update_absence_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAbsenceTypeRequest>,
) -> ApiResult<Json<AbsenceType>> {
    let absence_type = state.absence_type_service.update(&id, req).await?;

    Ok(Json(absence_type))
}

/// DELETE /api/absence-types/:id - Delete absence type
pub async fn delete_absence_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.absence_type_service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

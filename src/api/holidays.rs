use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{ApiError, ApiResult, AppState},
    models::{CreateHolidayRequest, PublicHoliday, StateSelection, StateSelectionRequest, UpdateHolidayRequest},
    services::HolidaySort,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

fn parse_sort(sort: Option<&str>) -> ApiResult<HolidaySort> {
    match sort {
        None | Some("name") => Ok(HolidaySort::Name),
        Some("sequence") => Ok(HolidaySort::Sequence),
        Some("sequence_desc") => Ok(HolidaySort::SequenceDesc),
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unknown sort order: {}",
            other
        ))),
    }
}

/// POST /api/holidays - Create a public holiday
pub async fn create_holiday(
    State(state): State<AppState>,
    Json(req): Json<CreateHolidayRequest>,
) -> ApiResult<Json<PublicHoliday>> {
    let holiday = state.holiday_service.create_holiday(req).await?;

    Ok(Json(holiday))
}

/// GET /api/holidays - List holidays (?sort=name|sequence|sequence_desc)
pub async fn list_holidays(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<PublicHoliday>>> {
    let sort = parse_sort(query.sort.as_deref())?;
    let holidays = state.holiday_service.list_holidays(sort).await?;

    Ok(Json(holidays))
}

/// GET /api/holidays/next-sequence - Next free display position
pub async fn next_sequence_no(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let next = state.holiday_service.next_sequence_no().await?;

    Ok(Json(json!({ "next_sequence_no": next })))
}

/// GET /api/holidays/:id - Get holiday by ID
pub async fn get_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicHoliday>> {
    let holiday = state.holiday_service.get_holiday(&id).await?;

    Ok(Json(holiday))
}

/// PUT /api/holidays/:id - Update holiday
pub async fn update_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHolidayRequest>,
) -> ApiResult<Json<PublicHoliday>> {
    let holiday = state.holiday_service.update_holiday(&id, req).await?;

    Ok(Json(holiday))
}

/// DELETE /api/holidays/:id - Delete holiday and its state links
pub async fn delete_holiday(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.holiday_service.delete_holiday(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/holidays/:id/states - State catalog with observance flags
pub async fn get_state_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<StateSelection>>> {
    let selections = state.holiday_service.get_state_selection(&id).await?;

    Ok(Json(selections))
}

/// PUT /api/holidays/:id/states - Replace which states observe the holiday
pub async fn save_state_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StateSelectionRequest>,
) -> ApiResult<StatusCode> {
    state
        .holiday_service
        .save_state_selection(&id, &req.state_ids)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

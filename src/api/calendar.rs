use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    api::{AppState, ApiResult},
    models::CalendarDay,
};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/calendar - Holidays and weekends within a date range
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Json<Vec<CalendarDay>>> {
    let days = state
        .calendar_service
        .calendar_between(range.start, range.end)
        .await?;

    Ok(Json(days))
}

/// GET /api/calendar/year/:year - Holidays and weekends for a whole year
pub async fn get_calendar_for_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<Vec<CalendarDay>>> {
    let days = state.calendar_service.calendar_for_year(year).await?;

    Ok(Json(days))
}

/// GET /api/calendar/weekends - Weekend overlay only, holidays ignored
pub async fn get_weekends(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Json<Vec<CalendarDay>>> {
    let days = state
        .calendar_service
        .weekends_between(range.start, range.end)?;

    Ok(Json(days))
}

/// GET /api/calendar/weekends/year/:year - Weekend overlay for a whole year
pub async fn get_weekends_for_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<Vec<CalendarDay>>> {
    let days = state.calendar_service.weekends_for_year(year)?;

    Ok(Json(days))
}

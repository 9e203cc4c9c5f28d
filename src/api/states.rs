use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiResult, AppState},
    models,
};

/// GET /api/states - State catalog ordered by name
pub async fn list_states(State(state): State<AppState>) -> ApiResult<Json<Vec<models::State>>> {
    let states = state.holiday_service.list_states().await?;

    Ok(Json(states))
}

/// GET /api/states/:id - Get state by ID
pub async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<models::State>> {
    let found = state.holiday_service.get_state(&id).await?;

    Ok(Json(found))
}

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiError, ApiResult, AppState},
    models::Employee,
};

/// GET /api/employees - Employee directory
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.db.list_employees().await?;

    Ok(Json(employees))
}

/// GET /api/employees/:id - Get employee by ID
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    let employee = state
        .db
        .get_employee(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee not found with id: {}", id)))?;

    Ok(Json(employee))
}

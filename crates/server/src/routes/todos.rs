use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::todo::{TodoCreate, TodoItem, TodoUpdate};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.todos.list().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<TodoCreate>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.todos.create(input.task).await?))
}

pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.todos.toggle(id).await?))
}

pub async fn rename(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<TodoUpdate>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.todos.rename(id, input.task).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_completed(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = state.todos.clear_completed().await?;
    Ok(Json(serde_json::json!({ "removed": removed })))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use models::guestbook::{EntryCreate, EntryUpdate, GuestbookEntry};
use service::pagination::Pagination;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn list(
    State(state): State<ServerState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<GuestbookEntry>>, ApiError> {
    Ok(Json(state.guestbook.list(p).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<EntryCreate>,
) -> Result<(StatusCode, Json<GuestbookEntry>), ApiError> {
    let entry = state.guestbook.create(input.name, input.message).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EntryUpdate>,
) -> Result<Json<GuestbookEntry>, ApiError> {
    Ok(Json(state.guestbook.update_message(id, input.message).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.guestbook.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

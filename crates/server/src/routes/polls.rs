use axum::{
    extract::{Path, State},
    Json,
};
use models::poll::{Poll, PollCreate, PollSummary, VoteRequest};

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<PollCreate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let poll_id = state.polls.create(input).await?;
    Ok(Json(serde_json::json!({ "poll_id": poll_id })))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Poll>, ApiError> {
    Ok(Json(state.polls.get(&id).await?))
}

pub async fn vote(
    State(state): State<ServerState>,
    Json(input): Json<VoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.polls.vote(input).await?;
    Ok(Json(serde_json::json!({ "message": "vote recorded" })))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PollSummary>>, ApiError> {
    Ok(Json(state.polls.list().await?))
}

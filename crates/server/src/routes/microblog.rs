use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use models::auth::LoginRequest;
use models::microblog::{PostCreate, PostView};

use crate::errors::ApiError;
use crate::state::{bearer_token, ServerState};

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = state.microblog.login(&input.username, &input.password)?;
    Ok(Json(serde_json::json!({
        "access_token": token,
        "user": { "username": input.username },
    })))
}

pub async fn create_post(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(input): Json<PostCreate>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let post = state.microblog.create_post(bearer_token(&headers)?, input.text).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_posts(State(state): State<ServerState>) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.microblog.list_posts().await?))
}

pub async fn user_posts(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<PostView>>, ApiError> {
    Ok(Json(state.microblog.user_posts(&username).await?))
}

pub async fn delete_post(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path(post_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.microblog.delete_post(bearer_token(&headers)?, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path(post_id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.microblog.like(bearer_token(&headers)?, post_id).await?;
    Ok(Json(serde_json::json!({ "message": "liked" })))
}

pub async fn unlike(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path(post_id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.microblog.unlike(bearer_token(&headers)?, post_id).await?;
    Ok(Json(serde_json::json!({ "message": "like removed" })))
}

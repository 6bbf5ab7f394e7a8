use axum::{
    extract::{Path, State},
    Json,
};
use models::blog::{BlogPost, BlogSummary};

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BlogSummary>>, ApiError> {
    Ok(Json(state.blog.list().await?))
}

pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog.get_by_slug(&slug).await?))
}

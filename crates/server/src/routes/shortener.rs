use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use models::shortener::{LinkStats, ShortenRequest, ShortenResponse};

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn shorten(
    State(state): State<ServerState>,
    Json(input): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, ApiError> {
    Ok(Json(state.shortener.shorten(input).await?))
}

pub async fn redirect(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Redirect, ApiError> {
    let long_url = state.shortener.resolve(&code).await?;
    Ok(Redirect::temporary(&long_url))
}

pub async fn stats(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStats>, ApiError> {
    Ok(Json(state.shortener.stats(&code).await?))
}

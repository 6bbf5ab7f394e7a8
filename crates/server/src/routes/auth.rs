use axum::{extract::State, http::HeaderMap, Json};
use models::auth::{LoginRequest, TokenResponse};

use crate::errors::ApiError;
use crate::state::{bearer_token, ServerState};

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Ok(Json(state.auth.login(&input)?))
}

pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_token(&headers)?;
    state.auth.logout(token);
    Ok(Json(serde_json::json!({ "message": "logged out" })))
}

pub async fn secret_data(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = state.auth.authenticate(bearer_token(&headers)?)?;
    Ok(Json(serde_json::json!({
        "message": format!("Hello, {}! You are a {:?}.", identity.username, identity.role),
    })))
}

pub async fn admin_data(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.auth.authenticate_admin(bearer_token(&headers)?)?;
    Ok(Json(serde_json::json!({ "secret": "This is admin-only information." })))
}

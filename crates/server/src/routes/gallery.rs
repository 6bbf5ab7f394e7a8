use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use service::gallery::MAX_IMAGE_BYTES;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Accept one multipart `file` field; the body must be an image and at
/// most 5 MiB.
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(ApiError::bad_request("file is not an image"));
        }
        let original_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("file has no name"))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::bad_request("file exceeds the 5 MiB limit"));
        }

        let url = state.gallery.save(&original_name, &bytes).await?;
        return Ok(Json(serde_json::json!({ "url": url })));
    }
    Err(ApiError::bad_request("missing file field"))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.gallery.list().await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.gallery.delete(&filename).await?;
    Ok(StatusCode::NO_CONTENT)
}

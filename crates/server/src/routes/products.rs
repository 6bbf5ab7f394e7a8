use axum::{
    extract::{Query, State},
    Json,
};
use models::product::Product;
use service::query::Criteria;

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn filter(
    State(state): State<ServerState>,
    Query(criteria): Query<Criteria>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.filter(&criteria)))
}

pub async fn categories(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.products.categories())
}

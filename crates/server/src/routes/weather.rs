use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::weather::{CurrentWeather, Forecast};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

pub async fn by_city(
    State(state): State<ServerState>,
    Path(city): Path<String>,
) -> Result<Json<CurrentWeather>, ApiError> {
    Ok(Json(state.weather.current_by_city(&city).await?))
}

pub async fn by_coords(
    State(state): State<ServerState>,
    Query(coords): Query<Coords>,
) -> Result<Json<CurrentWeather>, ApiError> {
    Ok(Json(state.weather.current_by_coords(coords.lat, coords.lon).await?))
}

pub async fn forecast(
    State(state): State<ServerState>,
    Path(city): Path<String>,
) -> Result<Json<Forecast>, ApiError> {
    Ok(Json(state.weather.forecast(&city).await?))
}

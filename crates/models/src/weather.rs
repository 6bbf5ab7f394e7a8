use serde::{Deserialize, Serialize};

/// Flattened view of an OpenWeatherMap current-conditions response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub city: String,
    pub forecast: Vec<ForecastDay>,
}

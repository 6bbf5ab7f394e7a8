//! Thin proxy over the OpenWeatherMap API.
//!
//! One request/await per call, no retry and no circuit breaking; a non-200
//! or unparsable upstream response surfaces as `Upstream`.

use models::weather::{CurrentWeather, Forecast, ForecastDay};
use serde_json::Value;

use crate::errors::ServiceError;

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_key: api_key.into(), base_url: base_url.into() }
    }

    fn key(&self) -> Result<&str, ServiceError> {
        if self.api_key.trim().is_empty() {
            return Err(ServiceError::Storage("weather api key not configured".into()));
        }
        Ok(&self.api_key)
    }

    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ServiceError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("unreadable upstream response: {e}")))?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("upstream request failed");
            return Err(ServiceError::Upstream(format!("{status}: {message}")));
        }
        Ok(body)
    }

    fn current_from(body: &Value) -> Result<CurrentWeather, ServiceError> {
        let shape = || ServiceError::Upstream("unexpected upstream response shape".into());
        Ok(CurrentWeather {
            city: body
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            temperature: body["main"]["temp"].as_f64().ok_or_else(shape)?,
            description: body["weather"][0]["description"]
                .as_str()
                .ok_or_else(shape)?
                .to_string(),
            icon: body["weather"][0]["icon"].as_str().ok_or_else(shape)?.to_string(),
        })
    }

    pub async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, ServiceError> {
        let key = self.key()?.to_string();
        let body = self
            .fetch(
                "weather",
                &[
                    ("q", city.to_string()),
                    ("appid", key),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;
        Self::current_from(&body)
    }

    pub async fn current_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentWeather, ServiceError> {
        let key = self.key()?.to_string();
        let body = self
            .fetch(
                "weather",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("appid", key),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;
        Self::current_from(&body)
    }

    /// Five-day forecast reduced to the noon entry of each day.
    pub async fn forecast(&self, city: &str) -> Result<Forecast, ServiceError> {
        let key = self.key()?.to_string();
        let body = self
            .fetch(
                "forecast",
                &[
                    ("q", city.to_string()),
                    ("appid", key),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        let shape = || ServiceError::Upstream("unexpected upstream response shape".into());
        let rows = body["list"].as_array().ok_or_else(shape)?;
        let mut days = Vec::new();
        for row in rows {
            let stamp = row["dt_txt"].as_str().unwrap_or_default();
            if !stamp.contains("12:00:00") {
                continue;
            }
            days.push(ForecastDay {
                date: stamp.split(' ').next().unwrap_or_default().to_string(),
                temperature: row["main"]["temp"].as_f64().ok_or_else(shape)?,
                description: row["weather"][0]["description"]
                    .as_str()
                    .ok_or_else(shape)?
                    .to_string(),
                icon: row["weather"][0]["icon"].as_str().ok_or_else(shape)?.to_string(),
            });
        }
        Ok(Forecast {
            city: body["city"]["name"].as_str().ok_or_else(shape)?.to_string(),
            forecast: days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_parses_the_upstream_shape() {
        let body = json!({
            "name": "Almaty",
            "main": { "temp": 21.5 },
            "weather": [{ "description": "clear sky", "icon": "01d" }]
        });
        let got = WeatherClient::current_from(&body).unwrap();
        assert_eq!(got.city, "Almaty");
        assert_eq!(got.temperature, 21.5);
        assert_eq!(got.icon, "01d");
    }

    #[test]
    fn missing_fields_are_an_upstream_error() {
        let body = json!({ "name": "Nowhere" });
        assert!(matches!(
            WeatherClient::current_from(&body),
            Err(ServiceError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = WeatherClient::new("", "https://api.openweathermap.org/data/2.5");
        assert!(matches!(
            client.current_by_city("Almaty").await,
            Err(ServiceError::Storage(_))
        ));
    }
}

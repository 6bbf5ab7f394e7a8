use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where file-backed stores and uploaded images live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: default_data_dir(), upload_dir: default_upload_dir() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_upload_dir() -> String { "data/images".into() }

/// Upstream weather API settings. The key may also come from the
/// `OPENWEATHER_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.data.normalize()?;
        self.weather.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DataConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(anyhow!("data.dir must not be empty"));
        }
        if self.upload_dir.trim().is_empty() {
            self.upload_dir = format!("{}/images", self.dir.trim_end_matches('/'));
        }
        Ok(())
    }
}

impl WeatherConfig {
    /// TOML wins over the environment; the env var is the common deployment path.
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
                self.api_key = key;
            }
        }
        if self.base_url.trim().is_empty() {
            self.base_url = default_weather_base_url();
        }
    }
}

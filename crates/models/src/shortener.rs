use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub long_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkStats {
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

pub fn validate_long_url(url: &str) -> Result<(), ModelError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ModelError::Validation("long_url must be an http(s) URL".into()));
    }
    Ok(())
}

pub fn validate_custom_code(code: &str) -> Result<(), ModelError> {
    if code.is_empty() || code.len() > 32 {
        return Err(ModelError::Validation("custom_code must be 1..=32 characters".into()));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(ModelError::Validation("custom_code must be alphanumeric, '-' or '_'".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_urls() {
        assert!(validate_long_url("ftp://example.com").is_err());
        assert!(validate_long_url("https://example.com").is_ok());
    }

    #[test]
    fn rejects_bad_custom_codes() {
        assert!(validate_custom_code("").is_err());
        assert!(validate_custom_code("has space").is_err());
        assert!(validate_custom_code("ok_code-1").is_ok());
    }
}

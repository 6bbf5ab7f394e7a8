use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryCreate {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryUpdate {
    pub message: String,
}

pub fn validate_entry(name: &str, message: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name must not be empty".into()));
    }
    if message.trim().is_empty() {
        return Err(ModelError::Validation("message must not be empty".into()));
    }
    Ok(())
}

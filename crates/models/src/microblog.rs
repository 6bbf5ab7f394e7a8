use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Relational-style rows: users, posts and likes reference each other by
/// integer id, three tables in miniature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogUser {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroPost {
    pub id: u64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub owner_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: u64,
    pub user_id: u64,
    pub post_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostCreate {
    pub text: String,
}

/// Post as rendered in feeds, with the owner and like tally joined in.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: u64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub owner_id: u64,
    pub owner_username: String,
    pub like_count: u64,
}

pub fn validate_post_text(text: &str) -> Result<(), ModelError> {
    if text.trim().is_empty() {
        return Err(ModelError::Validation("post text must not be empty".into()));
    }
    if text.len() > 500 {
        return Err(ModelError::Validation("post text must be at most 500 characters".into()));
    }
    Ok(())
}

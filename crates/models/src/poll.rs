use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Options keep their creation order so results render stably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub option: String,
    pub votes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollCreate {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub poll_id: String,
    pub option: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollSummary {
    pub id: String,
    pub question: String,
}

pub fn validate_poll(create: &PollCreate) -> Result<(), ModelError> {
    if create.question.trim().is_empty() {
        return Err(ModelError::Validation("question must not be empty".into()));
    }
    if create.options.len() < 2 {
        return Err(ModelError::Validation("a poll needs at least 2 options".into()));
    }
    Ok(())
}

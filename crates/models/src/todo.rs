use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub task: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoCreate {
    pub task: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoUpdate {
    pub task: String,
}

pub fn validate_task(task: &str) -> Result<(), ModelError> {
    if task.trim().is_empty() {
        return Err(ModelError::Validation("task must not be empty".into()));
    }
    Ok(())
}

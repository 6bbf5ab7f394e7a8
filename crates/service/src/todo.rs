//! Todo list backed by an in-memory store with uuid ids.

use models::todo::{validate_task, TodoItem};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::{Keyed, MemoryStore, ResourceStore};

impl Keyed for TodoItem {
    type Id = Uuid;
    fn id(&self) -> Uuid {
        self.id
    }
}

pub struct TodoService {
    store: MemoryStore<TodoItem>,
}

impl Default for TodoService {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoService {
    pub fn new() -> Self {
        Self { store: MemoryStore::new() }
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>, ServiceError> {
        self.store.list().await
    }

    pub async fn create(&self, task: String) -> Result<TodoItem, ServiceError> {
        validate_task(&task)?;
        let item = TodoItem { id: Uuid::new_v4(), task, completed: false };
        self.store.insert(item.clone()).await?;
        Ok(item)
    }

    /// Flip the completion flag.
    pub async fn toggle(&self, id: Uuid) -> Result<TodoItem, ServiceError> {
        self.store
            .update(&id, Box::new(|t: &mut TodoItem| t.completed = !t.completed))
            .await?
            .ok_or_else(|| ServiceError::not_found("todo"))
    }

    pub async fn rename(&self, id: Uuid, task: String) -> Result<TodoItem, ServiceError> {
        validate_task(&task)?;
        self.store
            .update(&id, Box::new(move |t: &mut TodoItem| t.task = task))
            .await?
            .ok_or_else(|| ServiceError::not_found("todo"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.remove(&id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("todo"))
        }
    }

    /// Drop every completed item; returns how many were removed.
    pub async fn clear_completed(&self) -> Result<usize, ServiceError> {
        self.store.retain(Box::new(|t: &TodoItem| !t.completed)).await
    }
}

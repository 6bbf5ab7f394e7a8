//! Guestbook entries, latest first, persisted through any store.

use chrono::Utc;
use models::guestbook::{validate_entry, GuestbookEntry};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{page_slice, Pagination};
use crate::storage::{Keyed, ResourceStore};

impl Keyed for GuestbookEntry {
    type Id = Uuid;
    fn id(&self) -> Uuid {
        self.id
    }
}

pub struct GuestbookService<S> {
    store: S,
}

impl<S: ResourceStore<GuestbookEntry>> GuestbookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Page through entries with the newest on top.
    pub async fn list(&self, p: Pagination) -> Result<Vec<GuestbookEntry>, ServiceError> {
        let mut entries = self.store.list().await?;
        entries.reverse();
        Ok(page_slice(&entries, p))
    }

    pub async fn create(&self, name: String, message: String) -> Result<GuestbookEntry, ServiceError> {
        validate_entry(&name, &message)?;
        let entry = GuestbookEntry { id: Uuid::new_v4(), name, message, timestamp: Utc::now() };
        self.store.insert(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn update_message(&self, id: Uuid, message: String) -> Result<GuestbookEntry, ServiceError> {
        if message.trim().is_empty() {
            return Err(ServiceError::Validation("message must not be empty".into()));
        }
        self.store
            .update(&id, Box::new(move |e: &mut GuestbookEntry| e.message = message))
            .await?
            .ok_or_else(|| ServiceError::not_found("entry"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.remove(&id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("entry"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn listing_is_newest_first_and_paginated() -> Result<(), anyhow::Error> {
        let svc = GuestbookService::new(MemoryStore::new());
        svc.create("a".into(), "first".into()).await?;
        svc.create("b".into(), "second".into()).await?;
        svc.create("c".into(), "third".into()).await?;

        let page1 = svc.list(Pagination { page: 1, limit: 2 }).await?;
        let messages: Vec<_> = page1.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second"]);

        let page2 = svc.list(Pagination { page: 2, limit: 2 }).await?;
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].message, "first");

        assert!(svc.list(Pagination { page: 3, limit: 2 }).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn edit_and_delete_by_id() -> Result<(), anyhow::Error> {
        let svc = GuestbookService::new(MemoryStore::new());
        let entry = svc.create("a".into(), "typo".into()).await?;

        let edited = svc.update_message(entry.id, "fixed".into()).await?;
        assert_eq!(edited.message, "fixed");
        assert_eq!(edited.name, "a");

        svc.delete(entry.id).await?;
        assert!(matches!(svc.delete(entry.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let svc = GuestbookService::new(MemoryStore::new());
        assert!(svc.create("".into(), "hi".into()).await.is_err());
        assert!(svc.create("a".into(), " ".into()).await.is_err());
    }
}

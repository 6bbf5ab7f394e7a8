use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Keyed, ResourceStore};
use crate::errors::ServiceError;

/// In-process resource store.
///
/// Records live in an insertion-ordered `Vec` behind one `RwLock`; lookups
/// are linear scans, which is the intended scale here. Every mutation takes
/// the write lock, so concurrent writers serialize rather than interleave.
#[derive(Clone)]
pub struct MemoryStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(Vec::new())) }
    }

    /// Start with a fixed set of records (catalogs, demo content).
    pub fn seeded(items: Vec<T>) -> Self {
        Self { inner: Arc::new(RwLock::new(items)) }
    }
}

impl<T> MemoryStore<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    /// Lookup by arbitrary predicate, first match wins.
    pub async fn get_by<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        let items = self.inner.read().await;
        items.iter().find(|t| pred(t)).cloned()
    }
}

#[async_trait]
impl<T> ResourceStore<T> for MemoryStore<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn insert(&self, item: T) -> Result<T::Id, ServiceError> {
        let mut items = self.inner.write().await;
        let id = item.id();
        if items.iter().any(|t| t.id() == id) {
            return Err(ServiceError::Conflict("id already in use".into()));
        }
        items.push(item);
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<T>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn find(&self, pred: Box<dyn for<'a> Fn(&'a T) -> bool + Send + 'static>) -> Result<Vec<T>, ServiceError> {
        let items = self.inner.read().await;
        Ok(items.iter().filter(|t| pred(t)).cloned().collect())
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, ServiceError> {
        let items = self.inner.read().await;
        Ok(items.iter().find(|t| &t.id() == id).cloned())
    }

    async fn update(
        &self,
        id: &T::Id,
        patch: Box<dyn for<'a> FnOnce(&'a mut T) + Send + 'static>,
    ) -> Result<Option<T>, ServiceError> {
        let mut items = self.inner.write().await;
        match items.iter_mut().find(|t| &t.id() == id) {
            Some(item) => {
                patch(item);
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &T::Id) -> Result<bool, ServiceError> {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| &t.id() != id);
        Ok(items.len() < before)
    }

    async fn retain(&self, keep: Box<dyn for<'a> Fn(&'a T) -> bool + Send + 'static>) -> Result<usize, ServiceError> {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| keep(t));
        Ok(before - items.len())
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.read().await.len())
    }
}

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};

use super::{Keyed, ResourceStore};
use crate::errors::ServiceError;

/// JSON-file-backed resource store.
///
/// The whole collection is a flat JSON array rewritten on every mutation.
/// The write lock is held across
/// the in-memory change and the file rewrite, so a concurrent writer cannot
/// interleave a read-modify-write; a crash mid-write can still truncate the
/// file, which is accepted at this scale.
#[derive(Clone)]
pub struct JsonArrayStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
    file_path: PathBuf,
}

impl<T> JsonArrayStore<T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Initialize from a path. Creates the file with an empty array if
    /// missing; an unreadable file starts empty rather than failing startup.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: Vec<T> = Vec::new();
                fs::write(
                    &file_path,
                    serde_json::to_vec(&empty).map_err(|e| ServiceError::Storage(e.to_string()))?,
                )
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
                empty
            }
        };

        Ok(Self { inner: Arc::new(RwLock::new(items)), file_path })
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[async_trait]
impl<T> ResourceStore<T> for JsonArrayStore<T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn insert(&self, item: T) -> Result<T::Id, ServiceError> {
        let mut items = self.inner.write().await;
        let id = item.id();
        if items.iter().any(|t| t.id() == id) {
            return Err(ServiceError::Conflict("id already in use".into()));
        }
        items.push(item);
        self.save(&items).await?;
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
        let updated = match items.iter_mut().find(|t| &t.id() == id) {
            Some(item) => {
                patch(item);
                Some(item.clone())
            }
            None => return Ok(None),
        };
        self.save(&items).await?;
        Ok(updated)
    }

    async fn remove(&self, id: &T::Id) -> Result<bool, ServiceError> {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| &t.id() != id);
        let removed = items.len() < before;
        if removed {
            self.save(&items).await?;
        }
        Ok(removed)
    }

    async fn retain(&self, keep: Box<dyn for<'a> Fn(&'a T) -> bool + Send + 'static>) -> Result<usize, ServiceError> {
        let mut items = self.inner.write().await;
        let before = items.len();
        items.retain(|t| keep(t));
        let dropped = before - items.len();
        if dropped > 0 {
            self.save(&items).await?;
        }
        Ok(dropped)
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: Uuid,
        body: String,
    }

    impl Keyed for Entry {
        type Id = Uuid;
        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn entry(body: &str) -> Entry {
        Entry { id: Uuid::new_v4(), body: body.into() }
    }

    #[tokio::test]
    async fn crud_survives_reload() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_array_store_{}.json", Uuid::new_v4()));
        let store = JsonArrayStore::new(&tmp).await?;

        let a = entry("a");
        let b = entry("b");
        store.insert(a.clone()).await?;
        store.insert(b.clone()).await?;
        store.update(&a.id, Box::new(|e: &mut Entry| e.body = "a2".into())).await?;
        assert!(store.remove(&b.id).await?);

        // reload from disk and verify the surviving state
        let reloaded = JsonArrayStore::<Entry>::new(&tmp).await?;
        let items = reloaded.list().await?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, a.id);
        assert_eq!(items[0].body, "a2");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_id_mutations_do_not_touch_the_file() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_array_store_{}.json", Uuid::new_v4()));
        let store = JsonArrayStore::new(&tmp).await?;
        store.insert(entry("only")).await?;

        let ghost = Uuid::new_v4();
        assert_eq!(store.update(&ghost, Box::new(|e: &mut Entry| e.body.clear())).await?, None);
        assert!(!store.remove(&ghost).await?);
        assert_eq!(store.count().await?, 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_array_store_{}.json", Uuid::new_v4()));
        tokio::fs::write(&tmp, b"not json").await?;

        let store = JsonArrayStore::<Entry>::new(&tmp).await?;
        assert_eq!(store.count().await?, 0);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}

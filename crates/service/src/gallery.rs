//! Image gallery: uploads land in one directory under uuid names.
//!
//! Size and content-type checks happen before `save` is called; this layer
//! owns the filename discipline and the directory I/O.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub struct GalleryService {
    dir: PathBuf,
    /// URL prefix the stored filenames are served under.
    public_prefix: String,
}

impl GalleryService {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self { dir: dir.into(), public_prefix: public_prefix.into() }
    }

    /// A filename is only ever a single path component we produced.
    fn checked_name(&self, filename: &str) -> Result<PathBuf, ServiceError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename.contains("..")
        {
            return Err(ServiceError::Validation("invalid filename".into()));
        }
        Ok(self.dir.join(filename))
    }

    /// Persist image bytes under a fresh uuid name, keeping the original
    /// extension. Returns the public URL path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ServiceError::Validation("file exceeds the 5 MiB limit".into()));
        }
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        let filename = format!("{}{}", Uuid::new_v4(), ext);

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(self.dir.join(&filename), bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        info!(%filename, bytes = bytes.len(), "image stored");
        Ok(format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename))
    }

    /// Public URL paths of everything in the directory.
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        let mut urls = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // nothing uploaded yet
            Err(_) => return Ok(urls),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?
        {
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                if let Some(name) = entry.file_name().to_str() {
                    urls.push(format!("{}/{}", self.public_prefix.trim_end_matches('/'), name));
                }
            }
        }
        urls.sort();
        Ok(urls)
    }

    pub async fn delete(&self, filename: &str) -> Result<(), ServiceError> {
        let path = self.checked_name(filename)?;
        if fs::metadata(&path).await.is_err() {
            return Err(ServiceError::not_found("file"));
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_gallery() -> GalleryService {
        let dir = std::env::temp_dir().join(format!("gallery_{}", Uuid::new_v4()));
        GalleryService::new(dir, "/static/images")
    }

    #[tokio::test]
    async fn save_list_delete_roundtrip() -> Result<(), anyhow::Error> {
        let svc = temp_gallery();
        let url = svc.save("cat.PNG", b"png-bytes").await?;
        assert!(url.starts_with("/static/images/"));
        assert!(url.ends_with(".png"));

        let listed = svc.list().await?;
        assert_eq!(listed, vec![url.clone()]);

        let filename = url.rsplit('/').next().unwrap();
        svc.delete(filename).await?;
        assert!(svc.list().await?.is_empty());
        assert!(matches!(svc.delete(filename).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected() {
        let svc = temp_gallery();
        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(svc.save("big.jpg", &big).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn path_traversal_names_are_rejected() {
        let svc = temp_gallery();
        assert!(svc.delete("../etc/passwd").await.is_err());
        assert!(svc.delete("a/b.png").await.is_err());
        assert!(svc.delete("").await.is_err());
    }

    #[tokio::test]
    async fn listing_an_empty_gallery_is_empty_not_an_error() -> Result<(), anyhow::Error> {
        let svc = temp_gallery();
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}

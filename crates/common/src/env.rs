//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

/// Create the data and image upload directories if missing.
/// Both hold runtime state (JSON stores, uploaded files) and must be writable.
pub async fn ensure_env(data_dir: &str, upload_dir: &str) -> anyhow::Result<()> {
    for dir in [data_dir, upload_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    }
    Ok(())
}

//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can call
//! `service::runtime::ensure_env` without depending on `common` directly.

/// Create the data and upload directories if missing.
pub async fn ensure_env(data_dir: &str, upload_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, upload_dir).await
}

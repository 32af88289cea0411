use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// User reviews persisted as a JSON array in a single file, newest first
///
/// Reviews are free-form JSON written by the front-end; the store only keeps
/// their order. Writers are serialized so concurrent posts never lose each
/// other's updates.
pub struct ReviewStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReviewStore {
    /// Opens the store, creating the parent directory and an empty list if needed
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, b"[]").await?;
            tracing::info!(path = %path.display(), "Created empty review store");
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored review, newest first
    pub async fn all(&self) -> AppResult<Vec<Value>> {
        let data = tokio::fs::read(&self.path).await?;
        serde_json::from_slice(&data)
            .map_err(|e| AppError::Internal(format!("Review store is corrupt: {}", e)))
    }

    /// Puts `review` at the front of the list
    pub async fn prepend(&self, review: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut reviews = self.all().await?;
        reviews.insert(0, review);

        let json = serde_json::to_vec_pretty(&reviews)
            .map_err(|e| AppError::Internal(format!("Review serialization error: {}", e)))?;

        // Write beside the target and rename so readers never see a partial file.
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(count = reviews.len(), "Review stored");
        Ok(())
    }
}

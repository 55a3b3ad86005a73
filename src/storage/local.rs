//! Local filesystem storage implementation.
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crashed run never leaves a half-written report behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::RawBoard;
use crate::storage::ArtifactStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a name; absolute names are used as-is.
    fn path(&self, name: &str) -> PathBuf {
        let candidate = Path::new(name);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root_dir.join(candidate)
        }
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(name);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(name, &bytes).await
    }
}

#[async_trait]
impl ArtifactStorage for LocalStorage {
    async fn write_report(&self, name: &str, markdown: &str) -> Result<PathBuf> {
        let path = self.write_bytes(name, markdown.as_bytes()).await?;
        log::debug!("Report written to {}", path.display());
        Ok(path)
    }

    async fn write_dump(&self, name: &str, board: &RawBoard) -> Result<PathBuf> {
        let path = self.write_json(name, board).await?;
        log::info!("Raw data dumped to: {}", path.display());
        Ok(path)
    }
}

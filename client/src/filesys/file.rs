//! File operations

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::QuickOpsError;

/// A file wrapper with path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Read file as JSON
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, QuickOpsError> {
        let contents = fs::read_to_string(&self.path).await?;
        let value = serde_json::from_str(&contents)?;
        Ok(value)
    }

    /// Read file as JSON, `None` if it does not exist
    pub async fn read_json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, QuickOpsError> {
        if !self.exists().await {
            return Ok(None);
        }
        self.read_json().await.map(Some)
    }

    /// Write JSON to file atomically through a sibling temp file
    pub async fn write_json<T: Serialize>(&self, value: &T) -> Result<(), QuickOpsError> {
        let contents = serde_json::to_string_pretty(value)?;
        self.write_atomic(contents.as_bytes(), false).await
    }

    /// Like `write_json`, but the file is owner-read/write only (0o600) on
    /// Unix from the moment it is created.
    pub async fn write_json_private<T: Serialize>(&self, value: &T) -> Result<(), QuickOpsError> {
        let contents = serde_json::to_string_pretty(value)?;
        self.write_atomic(contents.as_bytes(), true).await
    }

    /// Delete the file
    pub async fn delete(&self) -> Result<(), QuickOpsError> {
        if self.exists().await {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }

    async fn write_atomic(&self, contents: &[u8], private: bool) -> Result<(), QuickOpsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // A leftover temp file would keep its old mode
        let temp_path = self.path.with_extension("tmp");
        if fs::metadata(&temp_path).await.is_ok() {
            fs::remove_file(&temp_path).await?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            if private {
                options.mode(0o600);
            }
        }
        #[cfg(not(unix))]
        let _ = private;

        let mut file = options.open(&temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

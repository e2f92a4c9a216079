//! Storage layout configuration

use std::path::PathBuf;

use crate::errors::QuickOpsError;
use crate::filesys::file::File;

/// Environment variable that relocates the storage directory
pub const HOME_ENV: &str = "QUICKOPS_HOME";

/// Storage layout for the client
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory for all storage
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the settings file path
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("settings.json"))
    }

    /// Get the session file path
    pub fn session_file(&self) -> File {
        File::new(self.base_dir.join("session.json"))
    }

    /// Get the logs directory
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Setup the storage layout (create directories)
    pub async fn setup(&self) -> Result<(), QuickOpsError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::create_dir_all(self.logs_dir()).await?;
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Self::new(dir);
        }

        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quickops");

        Self::new(base_dir)
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
    }
}

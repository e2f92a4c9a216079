//! Settings file management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logs::LogLevel;
use crate::routes::AuthMode;

/// Client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit JSON log lines
    #[serde(default)]
    pub json_logs: bool,

    /// Also write logs under the storage directory
    #[serde(default)]
    pub log_to_file: bool,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendSettings,

    /// Session handling
    #[serde(default)]
    pub auth: AuthSettings,

    /// Post-deploy settle polling
    #[serde(default)]
    pub deploy: DeploySettings,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub mode: AuthMode,
}

/// Deployment settle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploySettings {
    /// Seconds between project status polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Seconds to wait before the first poll
    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,

    /// Give up after this many polls
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

fn default_poll_interval() -> u64 {
    5
}

fn default_initial_delay() -> u64 {
    2
}

fn default_max_polls() -> u32 {
    120
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            initial_delay_secs: default_initial_delay(),
            max_polls: default_max_polls(),
        }
    }
}

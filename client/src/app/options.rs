//! Application configuration options

use std::time::Duration;

use crate::routes::AuthMode;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;
use crate::workers::poller;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Backend API base URL
    pub backend_base_url: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Whether a session is required
    pub auth_mode: AuthMode,

    /// Storage layout paths
    pub storage: StorageLayout,

    /// Deployment settle poller options
    pub poller: poller::Options,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), StorageLayout::default())
    }
}

impl AppOptions {
    /// Resolve options from the settings file
    pub fn from_settings(settings: &Settings, storage: StorageLayout) -> Self {
        Self {
            backend_base_url: settings.backend.base_url.clone(),
            request_timeout: settings.backend.request_timeout(),
            auth_mode: settings.auth.mode,
            storage,
            poller: poller::Options {
                interval: Duration::from_secs(settings.deploy.poll_interval_secs),
                initial_delay: Duration::from_secs(settings.deploy.initial_delay_secs),
                max_polls: settings.deploy.max_polls,
            },
        }
    }
}

//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
    pub profile: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
        profile: option_env!("BUILD_PROFILE").unwrap_or("unknown").to_string(),
    }
}

/// User agent sent with every request
pub fn user_agent() -> String {
    let version = version_info();
    format!("quickops/{} ({})", version.version, version.git_hash)
}

/// Strip the scheme from a repository URL for display
pub fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

//! Deployment models

use std::fmt;

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Build or stage status reported by the build system.
///
/// Unknown values are kept verbatim and count as pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    #[default]
    InProgress,
    Success,
    Failed,
    Aborted,
    Other(String),
}

impl BuildStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BuildStatus::InProgress => "IN_PROGRESS",
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Failed => "FAILED",
            BuildStatus::Aborted => "ABORTED",
            BuildStatus::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Success | BuildStatus::Failed | BuildStatus::Aborted
        )
    }

    pub fn is_pending(&self) -> bool {
        !self.is_terminal()
    }
}

impl From<String> for BuildStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "IN_PROGRESS" => BuildStatus::InProgress,
            "SUCCESS" => BuildStatus::Success,
            "FAILED" => BuildStatus::Failed,
            "ABORTED" => BuildStatus::Aborted,
            _ => BuildStatus::Other(raw),
        }
    }
}

impl From<&str> for BuildStatus {
    fn from(raw: &str) -> Self {
        BuildStatus::from(raw.to_string())
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub status: BuildStatus,
}

/// Body of `POST /deploy`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRequest {
    pub id: String,
}

/// Snapshot returned when a deployment is triggered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployResponse {
    #[serde(default = "unreported_status")]
    pub status: BuildStatus,

    #[serde(default)]
    pub stages: Vec<StageRecord>,

    #[serde(rename = "buildId", default, deserialize_with = "string_or_number")]
    pub build_id: Option<String>,
}

/// A snapshot without a status has not been reported on yet
fn unreported_status() -> BuildStatus {
    BuildStatus::Other(String::new())
}

/// Body of `GET /logs/full/:jobName/:buildId`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogResponse {
    #[serde(default)]
    pub log: Option<String>,
}

//! API models

mod auth;
mod deploy;
mod project;

pub use auth::{AuthResponse, Credentials, User};
pub use deploy::{BuildStatus, DeployRequest, DeployResponse, LogResponse, StageRecord};
pub use project::{
    CreateProjectRequest, DeleteResponse, DeploymentChoice, Project, ProjectEnvelope,
    ProjectListEnvelope, ProjectStatus, UpdateProjectRequest,
};

use std::fmt::Display;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Error response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Human readable reason, if the backend supplied one
    pub fn reason(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Treat a missing, null or blank string as `None`
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

/// Accept identifiers sent either as JSON strings or numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Str(s)) if !s.is_empty() => Some(s),
        Some(StringOrNumber::Num(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Required identifier sent either as a JSON string or number
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) if !s.is_empty() => Ok(s),
        StringOrNumber::Num(n) => Ok(n.to_string()),
        StringOrNumber::Str(_) => Err(de::Error::custom("empty identifier")),
    }
}

/// Write a secret onto the wire. Only request bodies use this.
pub(crate) fn expose_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

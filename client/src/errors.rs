//! Error types for the QuickOps client

use thiserror::Error;

use crate::forms::ValidationError;

/// Main error type for the QuickOps client
#[derive(Error, Debug)]
pub enum QuickOpsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The backend answered 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx answer from the backend
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response from {path}: {reason}")]
    InvalidResponse { path: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A business rule enforced before any request is sent
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuickOpsError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, QuickOpsError::Unauthorized(_))
    }

    /// Reason supplied by the backend, if there was one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            QuickOpsError::Api {
                message: Some(message),
                ..
            } => Some(message),
            QuickOpsError::Unauthorized(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// One-line message for a notice, falling back when the backend said nothing
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            QuickOpsError::Validation(err) => err.to_string(),
            QuickOpsError::Rejected(reason) => reason.clone(),
            _ => self
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

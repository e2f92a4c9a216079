//! Client-side form state and validation

pub mod credentials;
pub mod project;

use thiserror::Error;

/// Why a form refused to submit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project name is required")]
    MissingName,

    #[error("GitHub access token is required")]
    MissingToken,

    #[error("Frontend repository URL is required")]
    MissingFrontendRepo,

    #[error("At least one backend repository URL is required")]
    MissingBackendRepo,

    #[error("{field} must start with https://")]
    NotHttps { field: String },

    #[error("{field} is not a valid URL")]
    InvalidUrl { field: String },

    #[error("A valid email address is required")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,
}

/// Check a repository URL: must parse and use https
pub(crate) fn check_https_url(field: &str, value: &str) -> Result<(), ValidationError> {
    if !value.starts_with("https://") {
        return Err(ValidationError::NotHttps {
            field: field.to_string(),
        });
    }
    match url::Url::parse(value) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            field: field.to_string(),
        }),
    }
}

//! Login and registration form

use openapi_client::models::Credentials;
use secrecy::{ExposeSecret, SecretString};

use super::ValidationError;

/// Email and password pair
#[derive(Debug)]
pub struct CredentialsForm {
    pub email: String,
    password: SecretString,
}

impl CredentialsForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let email = self.email.trim();
        let looks_like_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !looks_like_email {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingPassword);
        }

        Ok(Credentials {
            email: email.to_string(),
            password: SecretString::from(self.password.expose_secret().to_string()),
        })
    }
}

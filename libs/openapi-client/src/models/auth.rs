//! Authentication models

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{expose_secret, id_string};

/// Body of `POST /auth/login` and `POST /auth/register`
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

/// User as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", deserialize_with = "id_string")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Inactive accounts may not sign in
    #[serde(default)]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Auth endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    /// Bearer credential, either top level or embedded in the user
    pub fn bearer(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or(self.user.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

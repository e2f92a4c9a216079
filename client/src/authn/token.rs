//! Bearer token inspection

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims we care about in a bearer JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokenClaims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: Option<String>,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<i64>,

    /// Expiration timestamp
    #[serde(default)]
    pub exp: Option<i64>,
}

/// A bearer token wrapper.
///
/// The backend may hand out JWTs or opaque strings. Only JWTs carry an
/// expiry we can check locally; opaque tokens never expire client side.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Raw token string
    pub raw: String,

    /// Decoded claims, `None` for opaque tokens
    pub claims: Option<SessionTokenClaims>,
}

impl SessionToken {
    /// Inspect a raw token. The signature is NOT validated; the backend
    /// does that on every request.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<SessionTokenClaims>(&raw, &DecodingKey::from_secret(b""), &validation)
            .map(|data| data.claims)
            .ok();

        Self { raw, claims }
    }

    pub fn is_jwt(&self) -> bool {
        self.claims.is_some()
    }

    /// Get expiration time, if the token has one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .as_ref()
            .and_then(|c| c.exp)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|exp| exp < Utc::now())
    }
}

//! Auth API client

use openapi_client::models::{AuthResponse, Credentials};
use tracing::error;

use crate::errors::QuickOpsError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Sign in with email and password
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, QuickOpsError> {
        self.post("/auth/login", None, credentials)
            .await
            .inspect_err(|e| error!("Error logging in: {}", e))
    }

    /// Create an account
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, QuickOpsError> {
        self.post("/auth/register", None, credentials)
            .await
            .inspect_err(|e| error!("Error registering: {}", e))
    }
}

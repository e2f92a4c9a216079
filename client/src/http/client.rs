//! HTTP client implementation

use std::time::Duration;

use openapi_client::models::ErrorResponse;
use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::QuickOpsError;
use crate::utils::user_agent;

/// HTTP client for backend communication
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QuickOpsError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| QuickOpsError::ConfigError(format!("Invalid API URL {}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(QuickOpsError::ConfigError(format!(
                "Unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, QuickOpsError> {
        self.send::<T, ()>(Method::GET, path, token, None).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, QuickOpsError> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, QuickOpsError> {
        self.send(Method::PUT, path, token, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, QuickOpsError> {
        self.send::<T, ()>(Method::DELETE, path, token, None).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, QuickOpsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("X-Request-Id", uuid::Uuid::new_v4().to_string());

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("HTTP {} {} failed: {} - {}", method, path, status, text);
            return Err(status_error(status, &text));
        }

        decode_body(path, &text)
    }
}

/// Percent-encode a single path segment (project names can contain spaces)
pub fn encode_segment(segment: &str) -> String {
    let Ok(mut url) = url::Url::parse("http://localhost/") else {
        return segment.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Map a non-2xx answer onto the error taxonomy
fn status_error(status: StatusCode, body: &str) -> QuickOpsError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.reason().map(str::to_string));

    if status == StatusCode::UNAUTHORIZED {
        return QuickOpsError::Unauthorized(message.unwrap_or_default());
    }

    QuickOpsError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Decode a success body into its schema. Empty bodies decode as `null`.
fn decode_body<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, QuickOpsError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| QuickOpsError::InvalidResponse {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

//! Session file management

use chrono::{DateTime, Utc};
use openapi_client::models::User;
use serde::{Deserialize, Serialize};

use crate::errors::QuickOpsError;
use crate::filesys::file::File;

/// Signed-in user persisted between invocations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user
    pub user: User,

    /// Bearer credential attached to API calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Login timestamp
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for a freshly signed-in user
    pub fn new(user: User, token: Option<String>) -> Self {
        Self {
            user,
            token,
            logged_in_at: Utc::now(),
        }
    }

    /// Label for display, the email when known
    pub fn display_name(&self) -> &str {
        self.user.email.as_deref().unwrap_or(&self.user.id)
    }
}

/// Load the session from file, `None` when nobody is signed in
pub async fn load_session(session_file: &File) -> Result<Option<Session>, QuickOpsError> {
    session_file
        .read_json_opt()
        .await
        .map_err(|e| QuickOpsError::SessionError(format!("Failed to read session file: {}", e)))
}

/// Save the session to file, readable by the owner only
pub async fn save_session(session_file: &File, session: &Session) -> Result<(), QuickOpsError> {
    session_file.write_json_private(session).await
}

/// Remove the session file
pub async fn clear_session(session_file: &File) -> Result<(), QuickOpsError> {
    session_file.delete().await
}

//! Session store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::authn::token::SessionToken;
use crate::errors::QuickOpsError;
use crate::filesys::file::File;
use crate::storage::session::{clear_session, load_session, save_session, Session};

/// Session store trait for testability
#[async_trait]
pub trait SessionStoreExt: Send + Sync {
    /// Get the current session
    async fn current(&self) -> Option<Session>;

    /// Replace the session after a successful login
    async fn sign_in(&self, session: Session) -> Result<(), QuickOpsError>;

    /// Drop the session (logout or authorization failure)
    async fn clear(&self) -> Result<(), QuickOpsError>;
}

/// Session store backed by the session file
pub struct SessionStore {
    session_file: Arc<File>,
    cached: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Load the session from disk. Expired or unreadable sessions are
    /// discarded.
    pub async fn load(session_file: Arc<File>) -> Result<Self, QuickOpsError> {
        let mut session = match load_session(&session_file).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Stored session is unreadable, signing out: {}", e);
                clear_session(&session_file).await?;
                None
            }
        };

        let expired = session
            .as_ref()
            .and_then(|s| s.token.as_deref())
            .map(|raw| SessionToken::from_raw(raw).is_expired())
            .unwrap_or(false);

        if expired {
            warn!("Stored session token has expired, signing out");
            clear_session(&session_file).await?;
            session = None;
        }

        Ok(Self {
            session_file,
            cached: RwLock::new(session),
        })
    }

    /// Bearer token of the current session
    pub async fn bearer(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached.as_ref().and_then(|s| s.token.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.cached.read().await.is_some()
    }
}

#[async_trait]
impl SessionStoreExt for SessionStore {
    async fn current(&self) -> Option<Session> {
        self.cached.read().await.clone()
    }

    async fn sign_in(&self, session: Session) -> Result<(), QuickOpsError> {
        save_session(&self.session_file, &session).await?;
        info!("Signed in as {}", session.display_name());

        let mut cached = self.cached.write().await;
        *cached = Some(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), QuickOpsError> {
        let mut cached = self.cached.write().await;
        if cached.take().is_some() {
            debug!("Session cleared");
        }
        clear_session(&self.session_file).await
    }
}

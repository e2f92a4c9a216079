//! Application state management

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::options::AppOptions;
use crate::authn::session::{SessionStore, SessionStoreExt};
use crate::cache::projects::ProjectCollection;
use crate::errors::QuickOpsError;
use crate::http::client::HttpClient;
use crate::routes::{resolve, AuthMode, Navigation};
use crate::workers::poller;

/// State shared by every page controller
pub struct AppContext {
    /// HTTP client for backend communication
    pub http_client: Arc<HttpClient>,

    /// Signed-in user, if any
    pub session: Arc<SessionStore>,

    /// Client-side project collection
    pub projects: Arc<ProjectCollection>,

    /// Whether a session is required
    pub auth_mode: AuthMode,

    /// Deployment settle poller options
    pub poller: poller::Options,
}

impl AppContext {
    /// Initialize application state
    pub async fn init(options: &AppOptions) -> Result<Self, QuickOpsError> {
        info!("Initializing application state...");

        options.storage.setup().await?;

        let http_client = Arc::new(HttpClient::new(
            &options.backend_base_url,
            options.request_timeout,
        )?);

        let session = Arc::new(SessionStore::load(Arc::new(options.storage.session_file())).await?);

        Ok(Self {
            http_client,
            session,
            projects: Arc::new(ProjectCollection::new()),
            auth_mode: options.auth_mode,
            poller: options.poller.clone(),
        })
    }

    /// Bearer token to attach, never one when auth is disabled
    pub async fn token(&self) -> Option<String> {
        match self.auth_mode {
            AuthMode::Disabled => None,
            AuthMode::Required => self.session.bearer().await,
        }
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.is_signed_in().await
    }

    /// Drop the session when the backend rejected our credentials
    pub async fn handle_failure(&self, err: &QuickOpsError) {
        if self.auth_mode != AuthMode::Required || !err.is_unauthorized() {
            return;
        }

        warn!("Backend rejected the session, signing out");
        if let Err(e) = self.session.clear().await {
            warn!("Failed to clear session: {}", e);
        }
    }

    /// Re-fetch the whole project collection
    pub async fn refresh_projects(&self) -> Result<(), QuickOpsError> {
        self.projects.set_loading(true);
        let token = self.token().await;
        let result = self.http_client.list_projects(token.as_deref()).await;
        self.projects.set_loading(false);

        match result {
            Ok(projects) => {
                self.projects.replace(projects);
                Ok(())
            }
            Err(e) => {
                self.handle_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Resolve a path against the current session
    pub async fn navigate(&self, path: &str) -> Navigation {
        resolve(path, self.auth_mode, self.is_signed_in().await)
    }
}

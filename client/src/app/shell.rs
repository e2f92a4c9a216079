//! Root shell: sidebar, project listing and navigation

use colored::Colorize;
use tracing::debug;

use crate::app::state::AppContext;
use crate::components::project_list::render_list;
use crate::components::sidebar::render_sidebar;
use crate::components::Variant;
use crate::routes::{AuthMode, Navigation};

/// Root of the client
pub struct Shell {
    ctx: AppContext,
}

impl Shell {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }

    /// Load the project collection when there is someone to load it for.
    /// Failures are logged and leave an empty collection.
    pub async fn start(&self) {
        let can_load = match self.ctx.auth_mode {
            AuthMode::Disabled => true,
            AuthMode::Required => self.ctx.is_signed_in().await,
        };

        if !can_load {
            debug!("No session, skipping project load");
            self.ctx.projects.set_loading(false);
            return;
        }

        let _ = self.ctx.refresh_projects().await;
    }

    pub async fn navigate(&self, path: &str) -> Navigation {
        self.ctx.navigate(path).await
    }

    /// `/` view
    pub fn home_view(&self) -> String {
        let projects = self.ctx.projects.list();
        format!(
            "{}    {}\n\n{}",
            "My Projects".bold(),
            "[+ New Project]".cyan(),
            render_list(&projects, self.ctx.projects.is_loading(), Variant::Full)
        )
    }

    pub fn sidebar_view(&self) -> String {
        render_sidebar(&self.ctx.projects.list(), self.ctx.projects.is_loading())
    }
}

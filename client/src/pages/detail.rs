//! Project detail page: deploy, settle, delete

use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use openapi_client::models::{DeploymentChoice, Project, UpdateProjectRequest};
use tracing::{info, warn};

use crate::app::state::AppContext;
use crate::components::build_status_modal::BuildStatusModal;
use crate::components::project_view::render_detail;
use crate::errors::QuickOpsError;
use crate::notify::{Confirm, Notice, Notifier};
use crate::pages::projects::delete_project;
use crate::workers::poller::{watch_deployment, PollOutcome};

pub struct ProjectDetailPage {
    project_id: String,
    project: Option<Project>,
    selected: Option<DeploymentChoice>,
    submitting: bool,
    deleting: bool,
    error: Option<String>,
    modal: Option<BuildStatusModal>,
}

impl ProjectDetailPage {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project: None,
            selected: None,
            submitting: false,
            deleting: false,
            error: None,
            modal: None,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn modal(&self) -> Option<&BuildStatusModal> {
        self.modal.as_ref()
    }

    /// Fetch the project record
    pub async fn load(&mut self, ctx: &AppContext, notifier: &dyn Notifier) -> Result<(), QuickOpsError> {
        let token = ctx.token().await;
        match ctx.http_client.get_project(&self.project_id, token.as_deref()).await {
            Ok(project) => {
                self.selected = project.deployment_choice;
                self.project = Some(project);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                ctx.handle_failure(&e).await;
                self.error = Some("Failed to load project details".to_string());
                notifier.notify(Notice::error("Failed to load project details"));
                Err(e)
            }
        }
    }

    /// Pick a deployment target. A deployed project keeps its stored one.
    pub fn select_target(&mut self, choice: DeploymentChoice) -> Result<(), QuickOpsError> {
        if self.project.as_ref().is_some_and(Project::is_deployed) {
            return Err(QuickOpsError::Rejected(
                "Deployment type cannot be changed once deployed".to_string(),
            ));
        }
        self.selected = Some(choice);
        Ok(())
    }

    /// Target the next deploy will use
    pub fn target(&self) -> Option<DeploymentChoice> {
        match &self.project {
            Some(project) if project.is_deployed() => project.deployment_choice,
            _ => self.selected,
        }
    }

    /// Store the target and trigger a deployment.
    ///
    /// Returns `Ok(false)` without sending anything when no target is
    /// selected or a trigger is already in flight. On success the build
    /// status view opens and `submitting` stays set until [`Self::settle`].
    pub async fn deploy(&mut self, ctx: &AppContext, notifier: &dyn Notifier) -> Result<bool, QuickOpsError> {
        if self.submitting {
            return Ok(false);
        }
        let Some(choice) = self.target() else {
            return Ok(false);
        };
        let job_name = match &self.project {
            Some(project) => project.name.clone(),
            None => return Ok(false),
        };

        self.submitting = true;
        let token = ctx.token().await;

        let update = UpdateProjectRequest {
            deployment_choice: Some(choice),
        };
        if let Err(e) = ctx
            .http_client
            .update_project(&self.project_id, &update, token.as_deref())
            .await
        {
            self.submitting = false;
            ctx.handle_failure(&e).await;
            notifier.notify(Notice::error("Failed to start deployment"));
            return Err(e);
        }

        match ctx.http_client.deploy(&self.project_id, token.as_deref()).await {
            Ok(snapshot) => {
                info!("Deployment of {} to {} started", job_name, choice);
                self.modal = Some(BuildStatusModal::open(job_name, snapshot));
                notifier.notify(Notice::success("Deployment started successfully!"));
                Ok(true)
            }
            Err(e) => {
                self.submitting = false;
                ctx.handle_failure(&e).await;
                notifier.notify(Notice::error(e.user_message("Failed to start deployment")));
                Err(e)
            }
        }
    }

    /// Wait for the triggered deployment to settle, then refresh the
    /// project and the collection.
    pub async fn settle<S, F>(&mut self, ctx: &AppContext, sleep_fn: S) -> Result<PollOutcome, QuickOpsError>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        let token = ctx.token().await;
        let build_finished = self
            .modal
            .as_ref()
            .is_some_and(|m| m.state().is_terminal());
        let result = watch_deployment(
            &ctx.poller,
            &ctx.http_client,
            token.as_deref(),
            &self.project_id,
            build_finished,
            sleep_fn,
        )
        .await;
        self.submitting = false;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                ctx.handle_failure(&e).await;
                return Err(e);
            }
        };

        if outcome.settled {
            if let Some(modal) = self.modal.as_mut().filter(|m| m.is_open()) {
                modal.settle(outcome.project.status)?;
            }
        }

        ctx.projects.upsert(outcome.project.clone());
        self.project = Some(outcome.project.clone());

        if let Err(e) = ctx.refresh_projects().await {
            warn!("Failed to refresh projects after deployment: {}", e);
        }

        Ok(outcome)
    }

    /// Expand or collapse the failed build's log
    pub async fn toggle_error_details(&mut self, ctx: &AppContext) -> Result<(), QuickOpsError> {
        let token = ctx.token().await;
        match self.modal.as_mut() {
            Some(modal) => modal.toggle_error_details(&ctx.http_client, token.as_deref()).await,
            None => Err(QuickOpsError::InvalidTransition(
                "No build status to show".to_string(),
            )),
        }
    }

    pub fn close_modal(&mut self) -> Result<(), QuickOpsError> {
        match self.modal.as_mut() {
            Some(modal) => modal.close(),
            None => Ok(()),
        }
    }

    /// Delete the project shown on this page
    pub async fn delete(
        &mut self,
        ctx: &AppContext,
        confirm: &dyn Confirm,
        notifier: &dyn Notifier,
    ) -> Result<bool, QuickOpsError> {
        if self.deleting {
            return Ok(false);
        }
        let Some(project) = self.project.clone() else {
            return Ok(false);
        };

        self.deleting = true;
        let result = delete_project(ctx, &project, confirm, notifier).await;
        self.deleting = false;
        result
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error.red().to_string();
        }
        let Some(project) = &self.project else {
            return "Loading project details...".dimmed().to_string();
        };

        let mut out = render_detail(project, self.target(), self.submitting);
        if let Some(modal) = self.modal.as_ref().filter(|m| m.is_open()) {
            out.push_str("\n\n");
            out.push_str(&modal.render());
        }
        out
    }
}

//! "Create New Project" page

use openapi_client::models::Project;
use tracing::info;

use crate::app::state::AppContext;
use crate::errors::QuickOpsError;
use crate::forms::project::ProjectForm;
use crate::notify::{Notice, Notifier};

#[derive(Debug)]
pub struct ProjectFormPage {
    pub form: ProjectForm,
    submitting: bool,
}

impl Default for ProjectFormPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFormPage {
    pub fn new() -> Self {
        Self {
            form: ProjectForm::new(),
            submitting: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and submit the form.
    ///
    /// An invalid form sends nothing and keeps its contents. On success the
    /// new project joins the collection and the form is cleared.
    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        notifier: &dyn Notifier,
    ) -> Result<Option<Project>, QuickOpsError> {
        if self.submitting {
            return Ok(None);
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                notifier.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.submitting = true;
        let token = ctx.token().await;
        let result = ctx.http_client.create_project(&request, token.as_deref()).await;
        self.submitting = false;

        match result {
            Ok(project) => {
                info!("Created project {} ({})", project.name, project.id);
                ctx.projects.append(project.clone());
                notifier.notify(Notice::success("Project created successfully!"));
                self.form.reset();
                Ok(Some(project))
            }
            Err(e) => {
                ctx.handle_failure(&e).await;
                notifier.notify(Notice::error(e.user_message("Error creating project")));
                Err(e)
            }
        }
    }
}

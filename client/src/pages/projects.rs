//! Project listing actions

use openapi_client::models::Project;
use tracing::info;

use crate::app::state::AppContext;
use crate::errors::QuickOpsError;
use crate::notify::{Confirm, Notice, Notifier};

pub const DEPLOYED_DELETE_REJECTED: &str = "Deployed projects cannot be deleted";

/// Delete a project after confirmation.
///
/// Returns `Ok(false)` when the user declined. Deployed projects are
/// rejected before anything is sent.
pub async fn delete_project(
    ctx: &AppContext,
    project: &Project,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
) -> Result<bool, QuickOpsError> {
    if project.is_deployed() {
        notifier.notify(Notice::error(DEPLOYED_DELETE_REJECTED));
        return Err(QuickOpsError::Rejected(DEPLOYED_DELETE_REJECTED.to_string()));
    }

    let prompt = format!("Are you sure you want to delete \"{}\"?", project.name);
    if !confirm.confirm(&prompt) {
        return Ok(false);
    }

    let token = ctx.token().await;
    match ctx.http_client.delete_project(&project.id, token.as_deref()).await {
        Ok(_) => {
            info!("Deleted project {}", project.id);
            ctx.projects.remove(&project.id);
            notifier.notify(Notice::success("Project deleted successfully!"));
            Ok(true)
        }
        Err(e) => {
            ctx.handle_failure(&e).await;
            notifier.notify(Notice::error("Failed to delete project"));
            Err(e)
        }
    }
}

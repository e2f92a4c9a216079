//! Polling worker that waits for a deployment to settle

use std::future::Future;
use std::time::Duration;

use openapi_client::models::{Project, ProjectStatus};
use tracing::{debug, info, warn};

use crate::errors::QuickOpsError;
use crate::http::client::HttpClient;

/// Poller worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Polling interval
    pub interval: Duration,

    /// Initial delay before first poll
    pub initial_delay: Duration,

    /// Maximum number of polls before giving up
    pub max_polls: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            initial_delay: Duration::from_secs(2),
            max_polls: 120,
        }
    }
}

/// Result of watching a deployment
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// Last project record fetched
    pub project: Project,

    /// Whether the project left the deploying state
    pub settled: bool,

    /// Number of polls performed
    pub polls: u32,
}

/// Poll a project until its deployment settles or the poll budget runs out.
///
/// A project counts as settled once it is `deployed`, or once it is back
/// to `not deployed` after having been seen `deploying`. When the build
/// already finished, a single refresh settles the project whatever its
/// status. Errors are not retried; a 401 is returned to the caller like
/// any other failure.
pub async fn watch_deployment<S, F>(
    options: &Options,
    http_client: &HttpClient,
    token: Option<&str>,
    project_id: &str,
    build_finished: bool,
    sleep_fn: S,
) -> Result<PollOutcome, QuickOpsError>
where
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    info!("Watching deployment of project {}...", project_id);

    sleep_fn(options.initial_delay).await;

    let max_polls = if build_finished { 1 } else { options.max_polls.max(1) };
    let mut seen_deploying = false;
    let mut polls = 0;

    loop {
        let project = http_client.get_project(project_id, token).await?;
        polls += 1;
        debug!("Poll {}: project {} is {}", polls, project_id, project.status);

        let settled = match project.status {
            _ if build_finished => true,
            ProjectStatus::Deployed => true,
            ProjectStatus::Deploying => {
                seen_deploying = true;
                false
            }
            ProjectStatus::NotDeployed => seen_deploying,
        };

        if settled || polls >= max_polls {
            if !settled {
                warn!(
                    "Project {} did not settle after {} polls (last status: {})",
                    project_id, polls, project.status
                );
            }
            return Ok(PollOutcome {
                project,
                settled,
                polls,
            });
        }

        sleep_fn(options.interval).await;
    }
}

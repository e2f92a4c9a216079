//! Build status view shown after a deployment is triggered

use colored::Colorize;
use openapi_client::models::{DeployResponse, ProjectStatus};
use tracing::warn;

use crate::deploy::fsm::{BuildStatusFsm, ViewEvent, ViewState};
use crate::deploy::status::{stage_color, status_line};
use crate::errors::QuickOpsError;
use crate::http::client::HttpClient;

/// Build status view
#[derive(Debug, Clone)]
pub struct BuildStatusModal {
    fsm: BuildStatusFsm,
}

impl BuildStatusModal {
    /// Open on the snapshot returned by the deploy call. The job is the project name.
    pub fn open(job_name: impl Into<String>, snapshot: DeployResponse) -> Self {
        Self {
            fsm: BuildStatusFsm::new(job_name, snapshot),
        }
    }

    pub fn fsm(&self) -> &BuildStatusFsm {
        &self.fsm
    }

    pub fn state(&self) -> ViewState {
        self.fsm.state()
    }

    pub fn is_open(&self) -> bool {
        self.fsm.state() != ViewState::Closed
    }

    /// Feed a newer snapshot
    pub fn update(&mut self, snapshot: DeployResponse) -> Result<(), QuickOpsError> {
        self.apply(ViewEvent::Snapshot(snapshot))
    }

    /// Reflect the project's settled status
    pub fn settle(&mut self, status: ProjectStatus) -> Result<(), QuickOpsError> {
        self.apply(ViewEvent::Settled(status))
    }

    pub fn close(&mut self) -> Result<(), QuickOpsError> {
        self.apply(ViewEvent::Close)
    }

    /// Expand or collapse the error details. Expanding the first time
    /// fetches the failed build's log; a failed fetch shows a placeholder.
    pub async fn toggle_error_details(
        &mut self,
        http_client: &HttpClient,
        token: Option<&str>,
    ) -> Result<(), QuickOpsError> {
        let event = if self.fsm.is_error_expanded() {
            ViewEvent::CollapseErrorLog
        } else {
            ViewEvent::ExpandErrorLog
        };

        let request = self
            .fsm
            .process(event)
            .map_err(QuickOpsError::InvalidTransition)?;

        if let Some(request) = request {
            let event = match http_client
                .get_logs(&request.job_name, &request.build_id, token)
                .await
            {
                Ok(response) => ViewEvent::LogLoaded(response.log),
                Err(e) => {
                    warn!("Failed to fetch error logs: {}", e);
                    ViewEvent::LogFailed
                }
            };
            self.apply(event)?;
        }

        Ok(())
    }

    fn apply(&mut self, event: ViewEvent) -> Result<(), QuickOpsError> {
        self.fsm
            .process(event)
            .map(|_| ())
            .map_err(QuickOpsError::InvalidTransition)
    }

    pub fn render(&self) -> String {
        let mut out = vec!["Deployment Status".bold().to_string()];

        if self.fsm.stages().is_empty() {
            out.push("Loading stages...".dimmed().to_string());
        } else {
            let stages = self
                .fsm
                .stages()
                .iter()
                .map(|stage| {
                    let color = stage_color(&stage.status);
                    format!("{} {}", color.marker().color(color.to_color()), stage.name)
                })
                .collect::<Vec<_>>()
                .join("   ");
            out.push(stages);
        }

        let status = self.fsm.status();
        out.push(match self.fsm.state() {
            ViewState::Success => status_line(status).green().to_string(),
            ViewState::Failed => status_line(status).red().to_string(),
            ViewState::Aborted => status_line(status).dimmed().to_string(),
            _ => status_line(status),
        });

        if self.fsm.state() == ViewState::Failed {
            let stage = self
                .fsm
                .failed_stage()
                .map(|s| s.name.as_str())
                .unwrap_or("Unknown stage");
            let arrow = if self.fsm.is_error_expanded() { "▾" } else { "▸" };
            out.push(format!("{} Show error details for: {}", arrow, stage).red().to_string());

            if self.fsm.is_error_expanded() {
                let log = self.fsm.error_log().unwrap_or("Loading logs...");
                out.extend(log.lines().map(|line| format!("    {}", line)));
            }
        }

        out.join("\n")
    }
}

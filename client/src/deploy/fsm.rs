//! Finite State Machine for the build status view

use openapi_client::models::{BuildStatus, DeployResponse, ProjectStatus, StageRecord};

/// Text shown when the log endpoint returns nothing
pub const NO_LOGS_FOUND: &str = "No logs found.";

/// Text shown when the log fetch fails
pub const LOG_FETCH_FAILED: &str = "⚠️ Failed to fetch error logs.";

/// View state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Pending, no stages reported yet
    Loading,

    /// Pending with stages
    InProgress,

    Success,

    Failed,

    Aborted,

    /// Dismissed by the user
    Closed,
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Success | ViewState::Failed | ViewState::Aborted)
    }
}

/// View event
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A fresh build snapshot
    Snapshot(DeployResponse),

    /// The project left the deploying state
    Settled(ProjectStatus),

    /// User opened the error details
    ExpandErrorLog,

    /// User closed the error details
    CollapseErrorLog,

    /// Log fetch finished
    LogLoaded(Option<String>),

    /// Log fetch failed
    LogFailed,

    /// User dismissed the view
    Close,
}

/// Log fetch the caller has to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub job_name: String,
    pub build_id: String,
}

/// Build status view FSM
#[derive(Debug, Clone)]
pub struct BuildStatusFsm {
    job_name: String,
    snapshot: DeployResponse,
    closed: bool,
    error_expanded: bool,
    log_requested: bool,
    error_log: Option<String>,
}

impl BuildStatusFsm {
    /// Open the view on the snapshot returned by the deploy trigger
    pub fn new(job_name: impl Into<String>, snapshot: DeployResponse) -> Self {
        Self {
            job_name: job_name.into(),
            snapshot,
            closed: false,
            error_expanded: false,
            log_requested: false,
            error_log: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> ViewState {
        if self.closed {
            return ViewState::Closed;
        }
        match self.snapshot.status {
            BuildStatus::Success => ViewState::Success,
            BuildStatus::Failed => ViewState::Failed,
            BuildStatus::Aborted => ViewState::Aborted,
            _ if self.snapshot.stages.is_empty() => ViewState::Loading,
            _ => ViewState::InProgress,
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn status(&self) -> &BuildStatus {
        &self.snapshot.status
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.snapshot.stages
    }

    pub fn build_id(&self) -> Option<&str> {
        self.snapshot.build_id.as_deref()
    }

    /// First stage that failed
    pub fn failed_stage(&self) -> Option<&StageRecord> {
        self.snapshot
            .stages
            .iter()
            .find(|s| s.status == BuildStatus::Failed)
    }

    pub fn is_error_expanded(&self) -> bool {
        self.error_expanded
    }

    /// Content of the error pane, `None` while it is still loading
    pub fn error_log(&self) -> Option<&str> {
        self.error_log.as_deref()
    }

    /// Process an event. Returns the log fetch to run, if the event needs one.
    pub fn process(&mut self, event: ViewEvent) -> Result<Option<LogRequest>, String> {
        let state = self.state();
        if state == ViewState::Closed {
            return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
        }

        match event {
            // Terminal builds keep what they showed
            ViewEvent::Snapshot(_) | ViewEvent::Settled(_) if state.is_terminal() => {}

            ViewEvent::Snapshot(mut snapshot) => {
                if snapshot.build_id.is_none() {
                    snapshot.build_id = self.snapshot.build_id.take();
                }
                self.snapshot = snapshot;
            }

            ViewEvent::Settled(ProjectStatus::Deployed) => {
                self.snapshot.status = BuildStatus::Success;
            }
            ViewEvent::Settled(ProjectStatus::NotDeployed) => {
                self.snapshot.status = BuildStatus::Failed;
            }
            ViewEvent::Settled(ProjectStatus::Deploying) => {}

            ViewEvent::ExpandErrorLog if state == ViewState::Failed => {
                self.error_expanded = true;
                return Ok(self.next_log_request());
            }
            ViewEvent::CollapseErrorLog if state == ViewState::Failed => {
                self.error_expanded = false;
            }

            ViewEvent::LogLoaded(log) if self.log_requested => {
                let log = log.filter(|l| !l.trim().is_empty());
                self.error_log = Some(log.unwrap_or_else(|| NO_LOGS_FOUND.to_string()));
            }
            ViewEvent::LogFailed if self.log_requested => {
                self.error_log = Some(LOG_FETCH_FAILED.to_string());
            }

            ViewEvent::Close => {
                self.closed = true;
            }

            event => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        }

        Ok(None)
    }

    // One fetch per view; later expansions reuse whatever came back.
    fn next_log_request(&mut self) -> Option<LogRequest> {
        if self.log_requested {
            return None;
        }
        if self.failed_stage().is_none() {
            self.error_log.get_or_insert_with(|| NO_LOGS_FOUND.to_string());
            return None;
        }
        self.log_requested = true;

        match self.snapshot.build_id.clone() {
            Some(build_id) => Some(LogRequest {
                job_name: self.job_name.clone(),
                build_id,
            }),
            None => {
                self.error_log = Some(LOG_FETCH_FAILED.to_string());
                None
            }
        }
    }
}

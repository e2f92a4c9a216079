//! Deployment API client

use openapi_client::models::{DeployRequest, DeployResponse, LogResponse};
use tracing::error;

use crate::errors::QuickOpsError;
use crate::http::client::{encode_segment, HttpClient};

impl HttpClient {
    /// Trigger a deployment and get the initial build snapshot
    pub async fn deploy(&self, id: &str, token: Option<&str>) -> Result<DeployResponse, QuickOpsError> {
        let request = DeployRequest { id: id.to_string() };
        self.post("/deploy", token, &request)
            .await
            .inspect_err(|e| error!("Error triggering deployment: {}", e))
    }

    /// Fetch the full log of a build
    pub async fn get_logs(
        &self,
        job_name: &str,
        build_id: &str,
        token: Option<&str>,
    ) -> Result<LogResponse, QuickOpsError> {
        let path = format!(
            "/logs/full/{}/{}",
            encode_segment(job_name),
            encode_segment(build_id)
        );
        self.get(&path, token)
            .await
            .inspect_err(|e| error!("Error fetching build logs: {}", e))
    }
}

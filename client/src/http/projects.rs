//! Project API client

use openapi_client::models::{
    CreateProjectRequest, DeleteResponse, Project, ProjectEnvelope, ProjectListEnvelope,
    UpdateProjectRequest,
};
use tracing::error;

use crate::errors::QuickOpsError;
use crate::http::client::{encode_segment, HttpClient};

impl HttpClient {
    /// List all projects of the signed-in user
    pub async fn list_projects(&self, token: Option<&str>) -> Result<Vec<Project>, QuickOpsError> {
        let response: ProjectListEnvelope = self
            .get("/projects", token)
            .await
            .inspect_err(|e| error!("Error fetching all projects: {}", e))?;
        Ok(response.projects)
    }

    /// Get one project
    pub async fn get_project(&self, id: &str, token: Option<&str>) -> Result<Project, QuickOpsError> {
        let path = format!("/projects/{}", encode_segment(id));
        let response: ProjectEnvelope = self
            .get(&path, token)
            .await
            .inspect_err(|e| error!("Error fetching project by ID: {}", e))?;
        Ok(response.project)
    }

    /// Register a project
    pub async fn create_project(
        &self,
        request: &CreateProjectRequest,
        token: Option<&str>,
    ) -> Result<Project, QuickOpsError> {
        let response: ProjectEnvelope = self
            .post("/projects", token, request)
            .await
            .inspect_err(|e| error!("Error creating project: {}", e))?;
        Ok(response.project)
    }

    /// Partially update a project
    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
        token: Option<&str>,
    ) -> Result<Project, QuickOpsError> {
        let path = format!("/projects/{}", encode_segment(id));
        let response: ProjectEnvelope = self
            .put(&path, token, request)
            .await
            .inspect_err(|e| error!("Error updating project: {}", e))?;
        Ok(response.project)
    }

    /// Delete a project
    pub async fn delete_project(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Result<Option<DeleteResponse>, QuickOpsError> {
        let path = format!("/projects/{}", encode_segment(id));
        self.delete(&path, token)
            .await
            .inspect_err(|e| error!("Error deleting project: {}", e))
    }
}

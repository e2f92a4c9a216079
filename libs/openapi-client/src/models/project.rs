//! Project models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{empty_as_none, expose_secret, id_string};

/// Where a project gets deployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentChoice {
    #[serde(rename = "VM")]
    Vm,
    #[serde(rename = "Kubernetes")]
    Kubernetes,
}

impl DeploymentChoice {
    pub const ALL: [DeploymentChoice; 2] = [DeploymentChoice::Vm, DeploymentChoice::Kubernetes];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentChoice::Vm => "VM",
            DeploymentChoice::Kubernetes => "Kubernetes",
        }
    }
}

impl fmt::Display for DeploymentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vm" => Ok(DeploymentChoice::Vm),
            "kubernetes" | "k8s" => Ok(DeploymentChoice::Kubernetes),
            _ => Err(format!("Invalid deployment choice: {}", s)),
        }
    }
}

/// Deployment status of a project as tracked by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    NotDeployed,
    Deploying,
    Deployed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotDeployed => "not deployed",
            ProjectStatus::Deploying => "deploying",
            ProjectStatus::Deployed => "deployed",
        }
    }
}

// Anything the backend sends that we do not recognise reads as not deployed.
impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "deployed" => ProjectStatus::Deployed,
            "deploying" => ProjectStatus::Deploying,
            _ => ProjectStatus::NotDeployed,
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Backend identity
    #[serde(rename = "_id", alias = "id", deserialize_with = "id_string")]
    pub id: String,

    pub name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub frontend_repo: Option<String>,

    #[serde(default)]
    pub backend_repos: Vec<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub deployment_choice: Option<DeploymentChoice>,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Only set once deployed
    #[serde(default, deserialize_with = "empty_as_none")]
    pub public_ip: Option<String>,

    /// Only set once deployed
    #[serde(default, deserialize_with = "empty_as_none")]
    pub dns_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn is_deployed(&self) -> bool {
        self.status == ProjectStatus::Deployed
    }
}

/// Body of `POST /projects`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub frontend_repo: String,
    pub backend_repos: Vec<String>,
    #[serde(serialize_with = "expose_secret")]
    pub github_token: SecretString,
}

/// Body of `PUT /projects/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_choice: Option<DeploymentChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEnvelope {
    pub project: Project,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListEnvelope {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

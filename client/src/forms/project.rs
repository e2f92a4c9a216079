//! New project form

use openapi_client::models::CreateProjectRequest;
use secrecy::{ExposeSecret, SecretString};

use super::{check_https_url, ValidationError};

/// State of the "Create New Project" form
#[derive(Debug)]
pub struct ProjectForm {
    pub name: String,
    pub frontend_repo: String,
    backend_repos: Vec<String>,
    github_token: SecretString,
}

impl ProjectForm {
    /// Empty form with a single backend entry
    pub fn new() -> Self {
        Self {
            name: String::new(),
            frontend_repo: String::new(),
            backend_repos: vec![String::new()],
            github_token: SecretString::from(String::new()),
        }
    }

    pub fn set_github_token(&mut self, token: impl Into<String>) {
        self.github_token = SecretString::from(token.into());
    }

    pub fn has_github_token(&self) -> bool {
        !self.github_token.expose_secret().trim().is_empty()
    }

    pub fn backend_repos(&self) -> &[String] {
        &self.backend_repos
    }

    /// Edit one backend entry. Returns false for an out-of-range index.
    pub fn set_backend_repo(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.backend_repos.get_mut(index) {
            Some(entry) => {
                *entry = value.into();
                true
            }
            None => false,
        }
    }

    /// Append an empty backend entry
    pub fn add_backend_repo(&mut self) {
        self.backend_repos.push(String::new());
    }

    /// Remove a backend entry. The last remaining entry is never removed.
    pub fn remove_backend_repo(&mut self, index: usize) -> bool {
        if self.backend_repos.len() <= 1 || index >= self.backend_repos.len() {
            return false;
        }
        self.backend_repos.remove(index);
        true
    }

    /// Validate and build the creation payload. The form is left untouched.
    pub fn validate(&self) -> Result<CreateProjectRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.has_github_token() {
            return Err(ValidationError::MissingToken);
        }

        let frontend_repo = self.frontend_repo.trim();
        if frontend_repo.is_empty() {
            return Err(ValidationError::MissingFrontendRepo);
        }
        check_https_url("Frontend repository URL", frontend_repo)?;

        let first = self.backend_repos.first().map(|r| r.trim()).unwrap_or("");
        if first.is_empty() {
            return Err(ValidationError::MissingBackendRepo);
        }

        let mut backend_repos = Vec::with_capacity(self.backend_repos.len());
        for (index, repo) in self.backend_repos.iter().enumerate() {
            let repo = repo.trim();
            // Optional extra entries left blank are not sent
            if repo.is_empty() {
                continue;
            }
            check_https_url(&format!("Backend repository URL #{}", index + 1), repo)?;
            backend_repos.push(repo.to_string());
        }

        Ok(CreateProjectRequest {
            name: name.to_string(),
            frontend_repo: frontend_repo.to_string(),
            backend_repos,
            github_token: SecretString::from(self.github_token.expose_secret().to_string()),
        })
    }

    /// Clear everything after a successful submit
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

//! Client-side project collection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use openapi_client::models::Project;

/// In-memory copy of the user's projects.
///
/// The backend is the system of record; this copy is only ever replaced
/// wholesale or touched by single append/remove notifications.
pub struct ProjectCollection {
    entries: RwLock<Vec<Project>>,
    loading: AtomicBool,
}

impl ProjectCollection {
    /// Create an empty collection that has not loaded yet
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    /// Replace everything with a fresh listing
    pub fn replace(&self, projects: Vec<Project>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        *entries = projects;
    }

    /// Append a newly created project. Returns false if it was already present.
    pub fn append(&self, project: Project) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.iter().any(|p| p.id == project.id) {
            return false;
        }
        entries.push(project);
        true
    }

    /// Refresh a single record in place
    pub fn upsert(&self, project: Project) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        match entries.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => entries.push(project),
        }
    }

    /// Remove a deleted project
    pub fn remove(&self, project_id: &str) -> Option<Project> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let index = entries.iter().position(|p| p.id == project_id)?;
        Some(entries.remove(index))
    }

    /// Get a project by id
    pub fn get(&self, project_id: &str) -> Option<Project> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.iter().find(|p| p.id == project_id).cloned()
    }

    /// Snapshot of all projects, in backend order
    pub fn list(&self) -> Vec<Project> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.clone()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProjectCollection {
    fn default() -> Self {
        Self::new()
    }
}

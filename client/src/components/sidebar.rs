//! Sidebar with the compact project list

use chrono::{Datelike, Utc};
use colored::Colorize;
use openapi_client::models::Project;

use super::project_list::render_list;
use super::Variant;

pub fn render_sidebar(projects: &[Project], loading: bool) -> String {
    [
        format!("{}{}", "Quick".cyan().bold(), "Ops".bold()),
        "+ Add Project   (quickops create)".to_string(),
        String::new(),
        "Projects".bold().to_string(),
        render_list(projects, loading, Variant::Compact),
        String::new(),
        format!("© {} QuickOps. All rights reserved.", Utc::now().year())
            .dimmed()
            .to_string(),
    ]
    .join("\n")
}

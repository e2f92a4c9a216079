//! One project in a list

use colored::Colorize;
use openapi_client::models::{Project, ProjectStatus};

use super::Variant;

/// Status badge for a project
pub fn status_badge(status: ProjectStatus, variant: Variant) -> String {
    match (status, variant) {
        (ProjectStatus::Deployed, Variant::Compact) => "✔".green().to_string(),
        (ProjectStatus::Deploying, Variant::Compact) => "…".yellow().to_string(),
        (ProjectStatus::NotDeployed, Variant::Compact) => "✖".red().to_string(),
        (ProjectStatus::Deployed, Variant::Full) => "[✔ Deployed]".green().to_string(),
        (ProjectStatus::Deploying, Variant::Full) => "[… Deploying]".yellow().to_string(),
        (ProjectStatus::NotDeployed, Variant::Full) => "[✖ Not Deployed]".red().to_string(),
    }
}

/// Only projects that were never deployed offer deletion from a list
pub fn shows_delete(project: &Project, variant: Variant) -> bool {
    variant == Variant::Full && project.status == ProjectStatus::NotDeployed
}

pub fn render_item(project: &Project, variant: Variant) -> String {
    if variant == Variant::Compact {
        return format!(
            "{} {}",
            status_badge(project.status, variant),
            project.name
        );
    }

    let mut line = format!(
        "{}  {}",
        project.name.bold(),
        status_badge(project.status, variant)
    );
    if let Some(choice) = project.deployment_choice {
        line.push_str(&format!("  [🚀 {}]", choice));
    }
    line.push_str(&format!("  {}", format!("/project/{}", project.id).dimmed()));
    if shows_delete(project, variant) {
        line.push_str(&format!("  {}", "(deletable)".dimmed()));
    }
    line
}

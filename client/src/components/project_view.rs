//! Project detail view

use colored::Colorize;
use openapi_client::models::{DeploymentChoice, Project};

use super::project_item::status_badge;
use super::Variant;
use crate::utils::display_url;

/// Label of the deploy action
pub fn action_label(project: &Project, submitting: bool) -> &'static str {
    match (project.is_deployed(), submitting) {
        (true, true) => "Updating...",
        (false, true) => "Deploying...",
        (true, false) => "Update",
        (false, false) => "Deploy",
    }
}

pub fn render_detail(
    project: &Project,
    selected: Option<DeploymentChoice>,
    submitting: bool,
) -> String {
    let mut out = Vec::new();

    let mut header = format!(
        "{}  {}",
        project.name.bold(),
        status_badge(project.status, Variant::Full)
    );
    if let Some(choice) = project.deployment_choice {
        header.push_str(&format!("  [🚀 {}]", choice));
    }
    out.push(header);
    out.push(String::new());

    out.push("Frontend Repository".bold().to_string());
    match project.frontend_repo.as_deref() {
        Some(url) => out.push(format!("  {}", display_url(url))),
        None => out.push(format!("  {}", "Not specified".dimmed())),
    }
    out.push(String::new());

    out.push("Backend Repositories".bold().to_string());
    if project.backend_repos.is_empty() {
        out.push(format!("  {}", "No backend repositories".dimmed()));
    }
    for (index, repo) in project.backend_repos.iter().enumerate() {
        out.push(format!("  {}. {}", index + 1, display_url(repo)));
    }
    out.push(String::new());

    out.push("Deployment Details".bold().to_string());
    if project.is_deployed() {
        let choice = project
            .deployment_choice
            .map(|c| c.to_string())
            .unwrap_or_default();
        out.push(format!("  Deployment type: {}", choice.bold()));
        out.push(format!(
            "  Public IP: {}",
            project.public_ip.as_deref().unwrap_or("").bold()
        ));
        let dns = project.dns_label.as_deref().unwrap_or("");
        out.push(format!("  🌐 DNS: http://{}", dns));
    } else {
        for choice in DeploymentChoice::ALL {
            let mark = if selected == Some(choice) { "(•)" } else { "( )" };
            out.push(format!("  {} {}", mark, choice));
        }
    }
    out.push(String::new());
    out.push(format!("[{}]", action_label(project, submitting)));

    out.join("\n")
}

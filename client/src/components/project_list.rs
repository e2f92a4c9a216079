//! Project list

use openapi_client::models::Project;

use super::project_item::render_item;
use super::Variant;

pub fn render_list(projects: &[Project], loading: bool, variant: Variant) -> String {
    if loading {
        return match variant {
            Variant::Compact => "Loading...".to_string(),
            Variant::Full => "Loading projects...".to_string(),
        };
    }

    if projects.is_empty() {
        return match variant {
            Variant::Compact => "No projects".to_string(),
            Variant::Full => {
                "No projects found\nCreate your first project to get started".to_string()
            }
        };
    }

    let indent = match variant {
        Variant::Compact => "  ",
        Variant::Full => "",
    };
    projects
        .iter()
        .map(|p| format!("{}{}", indent, render_item(p, variant)))
        .collect::<Vec<_>>()
        .join("\n")
}

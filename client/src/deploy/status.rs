//! Build status presentation vocabulary

use colored::Color;
use openapi_client::models::BuildStatus;

/// Visual status of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageColor {
    Green,
    Red,
    Gray,
    Yellow,
    /// Anything we do not recognise
    Default,
}

impl StageColor {
    /// Terminal colour used when rendering
    pub fn to_color(&self) -> Color {
        match self {
            StageColor::Green => Color::Green,
            StageColor::Red => Color::Red,
            StageColor::Gray => Color::BrightBlack,
            StageColor::Yellow => Color::Yellow,
            StageColor::Default => Color::White,
        }
    }

    /// Glyph drawn for the stage marker
    pub fn marker(&self) -> &'static str {
        match self {
            StageColor::Green => "●",
            StageColor::Red => "✖",
            StageColor::Gray => "○",
            StageColor::Yellow => "◐",
            StageColor::Default => "·",
        }
    }
}

/// Map a stage status to its colour. Total over every status string.
pub fn stage_color(status: &BuildStatus) -> StageColor {
    match status {
        BuildStatus::Success => StageColor::Green,
        BuildStatus::Failed => StageColor::Red,
        BuildStatus::Aborted => StageColor::Gray,
        BuildStatus::InProgress => StageColor::Yellow,
        BuildStatus::Other(_) => StageColor::Default,
    }
}

/// Overall status line shown under the stages
pub fn status_line(status: &BuildStatus) -> String {
    match status {
        BuildStatus::Success => "✅ Deployment successful".to_string(),
        BuildStatus::Failed => "❌ Deployment failed".to_string(),
        BuildStatus::Aborted => "⚠️ Deployment aborted".to_string(),
        BuildStatus::Other(raw) if raw.trim().is_empty() => "Loading...".to_string(),
        other => other.as_str().to_string(),
    }
}

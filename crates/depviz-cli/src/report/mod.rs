//! Report rendering for dependency forests.

mod html;
mod json;

pub use html::render_html;
pub use json::render_json;

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use depviz_graph::DependencyNode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultExt};

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Standalone HTML page, one collapsible block per entry
    #[default]
    Html,
    /// The trees as pretty-printed JSON
    Json,
}

/// Render `trees` in `format`.
pub fn render(trees: &[DependencyNode], format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Html => render_html(trees)?,
        ReportFormat::Json => render_json(trees)?,
    })
}

/// Render `trees` and write them to `out`, creating parent directories.
pub fn write_report(trees: &[DependencyNode], format: ReportFormat, out: &Path) -> Result<()> {
    let content = render(trees, format)?;
    if let Some(parent) = out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(out, content).with_path(out)?;
    tracing::debug!(path = %out.display(), ?format, "Wrote report");
    Ok(())
}

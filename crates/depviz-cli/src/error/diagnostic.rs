//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use depviz_detect::DetectError;
use miette::Report;

/// Convert CliError to a miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Detect(e) => detect_error_to_miette(e),
        CliError::Project(e) => miette::miette!("Project error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert DetectError to a miette Report
pub fn detect_error_to_miette(err: DetectError) -> Report {
    match err {
        DetectError::Config(e) => miette::miette!("Project error: {}", e),
        DetectError::InvalidBundlerConfig { path, reason } => miette::miette!(
            "Could not read bundler config {}: {}\n\nHint: pass --entry <file> to skip entry detection",
            path.display(),
            reason
        ),
        _ => miette::miette!("{}", err),
    }
}

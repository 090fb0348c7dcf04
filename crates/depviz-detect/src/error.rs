//! Error types for project detection.

use std::path::PathBuf;

use depviz_graph::{ConfigError, Framework};
use thiserror::Error;

use crate::build_tool::BuildTool;

/// Result alias used throughout the crate.
pub type Result<T, E = DetectError> = std::result::Result<T, E>;

/// Errors raised while detecting a project's framework and entries.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Manifest or project root problems.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Nuxt.js support is not implemented yet")]
    NuxtUnsupported,

    /// No entry convention matched, or every candidate was missing.
    #[error(
        "Could not detect entry files for {framework} with {build_tool}\n\nHint: pass --entry <file> explicitly"
    )]
    NoEntries {
        framework: Framework,
        build_tool: BuildTool,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundler config that does not parse as JavaScript or TypeScript.
    #[error("Invalid bundler config {}: {reason}", path.display())]
    InvalidBundlerConfig { path: PathBuf, reason: String },
}

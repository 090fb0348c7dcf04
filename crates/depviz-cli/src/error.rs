//! Error handling for the depviz CLI.
//!
//! [`CliError`] wraps the library errors (`GraphError`, `DetectError` and
//! the project `ConfigError`) together with the CLI's own settings and I/O
//! failures. `main` turns it into a miette report at the very top.

mod diagnostic;

pub use diagnostic::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// depviz.config.json, environment or flag problems
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The project itself is unusable (no manifest, bad tsconfig, ...)
    #[error(transparent)]
    Project(#[from] depviz_graph::ConfigError),

    #[error(transparent)]
    Detect(#[from] depviz_detect::DetectError),

    #[error(transparent)]
    Graph(#[from] depviz_graph::GraphError),

    /// Report template failed to render
    #[error("Failed to render report: {0}")]
    Render(#[from] minijinja::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Errors while assembling [`DepvizConfig`](crate::config::DepvizConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file is missing
    #[error("Config file not found: {}\n\nHint: Create a depviz.config.json file or drop --config", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be merged or does not match the schema
    #[error("Invalid configuration: {message}\n\nHint: Check depviz.config.json and DEPVIZ_* variables for typos and field types")]
    Invalid { message: String },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Report a missing file as [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint line to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }
}

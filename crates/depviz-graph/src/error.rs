//! Error types for graph construction.
//!
//! Only configuration-level failures ever reach the caller of the builder.
//! File-level failures (unreadable or unparsable sources) are reported through
//! [`GraphError`] internally and then folded into `unknown` nodes.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors raised while building dependency trees.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The run was started without a single entry file.
    #[error("No entry files to analyze\n\nHint: pass --entry <file> or check framework detection")]
    NoEntries,

    /// The project configuration could not be assembled.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file contains syntax the parser rejects.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Errors in project configuration. These are fatal for a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The project root does not exist or is not a directory.
    #[error("Project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// No package.json next to the project root.
    #[error("package.json not found in {}\n\nHint: run depviz from the project root or pass --root", .0.display())]
    ManifestNotFound(PathBuf),

    /// A package.json that cannot be read or decoded.
    #[error("Invalid manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    /// A tsconfig.json that cannot be read or decoded.
    #[error("Invalid tsconfig {}: {reason}", path.display())]
    InvalidTsconfig { path: PathBuf, reason: String },

    /// A path alias with an empty pattern or no usable target.
    #[error("Invalid path alias '{pattern}': {reason}")]
    InvalidAlias { pattern: String, reason: String },

    /// The ignore file contains an unusable glob.
    #[error("Invalid ignore rules in {}: {reason}", path.display())]
    InvalidIgnore { path: PathBuf, reason: String },
}

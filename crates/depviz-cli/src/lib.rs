//! depviz CLI.
//!
//! - [`cli`] - argument definitions (clap derive)
//! - [`config`] - layered `depviz.config.json` / environment / flag settings
//! - [`commands`] - `analyze` and `detect`
//! - [`report`] - HTML and JSON renderers for dependency forests
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - progress bar and status lines
//!
//! ```rust,no_run
//! use depviz_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};

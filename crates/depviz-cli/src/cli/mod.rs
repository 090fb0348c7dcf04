//! Command-line interface definition.
//!
//! - `depviz analyze` - build dependency trees and write a report
//! - `depviz detect` - print the detected framework, build tool and entries

mod commands;
mod validation;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command, DetectArgs};
pub use validation::{parse_alias, parse_framework};

/// depviz - dependency graphs for front-end projects
#[derive(Parser, Debug)]
#[command(
    name = "depviz",
    version,
    about = "Dependency graphs for React-family front-end projects",
    long_about = "depviz walks the imports of each entry file, classifies every imported\n\
                  symbol (component, hook, function, type, style, ...) and renders the\n\
                  resulting trees as an HTML page or JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

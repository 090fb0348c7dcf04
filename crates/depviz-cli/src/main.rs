//! depviz CLI - dependency graphs for front-end projects.
//!
//! Parses arguments, initializes logging and colors, then dispatches to the
//! command implementations.

use clap::Parser;
use depviz_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args, args.quiet),
        cli::Command::Detect(detect_args) => commands::detect_execute(detect_args),
    };

    result.map_err(error::cli_error_to_miette)
}

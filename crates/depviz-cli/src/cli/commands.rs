use clap::{Args, Subcommand};
use depviz_graph::Framework;
use std::path::PathBuf;

use crate::cli::validation::{parse_alias, parse_framework};
use crate::report::ReportFormat;

/// Available depviz subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze entry files and write a dependency report
    ///
    /// Entries are detected from the project layout unless given with
    /// --entry. Each entry becomes one tree in the report.
    Analyze(AnalyzeArgs),

    /// Print the detected framework, build tool and entry files
    Detect(DetectArgs),
}

/// Arguments for the analyze command
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Project root (directory containing package.json)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Framework to assume instead of detecting it
    #[arg(short, long, value_parser = parse_framework, value_name = "FRAMEWORK")]
    pub framework: Option<Framework>,

    /// Entry file to analyze (repeatable); skips entry detection
    ///
    /// Relative paths are resolved against the project root.
    #[arg(short, long = "entry", value_name = "FILE")]
    pub entries: Vec<PathBuf>,

    /// Path alias as PATTERN=TARGET (repeatable), e.g. @=src
    #[arg(short, long = "alias", value_parser = parse_alias, value_name = "PATTERN=TARGET")]
    pub aliases: Vec<(String, String)>,

    /// Report file to write
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Analyze entries in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Config file (defaults to depviz.config.json in the project root)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the detect command
#[derive(Args, Debug, Default)]
pub struct DetectArgs {
    /// Project root (directory containing package.json)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Framework to assume instead of detecting it
    #[arg(short, long, value_parser = parse_framework, value_name = "FRAMEWORK")]
    pub framework: Option<Framework>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

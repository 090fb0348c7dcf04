//! Layered CLI configuration.
//!
//! Sources, lowest to highest priority: built-in defaults,
//! `depviz.config.json`, `DEPVIZ_*` environment variables, command-line
//! flags.

mod loading;

pub use loading::{env_key, CONFIG_FILE_NAME};

use std::collections::BTreeMap;
use std::path::PathBuf;

use depviz_graph::Framework;
use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

/// Settings for one `depviz analyze` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DepvizConfig {
    /// Project root containing package.json
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Base for the relative paths in the report (defaults to the root)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Framework override; detected from package.json when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,

    /// Entry files relative to the root; detected when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<PathBuf>,

    /// Extra path aliases, pattern to target directory
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// Ignore file name looked up in the root
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Report file
    #[serde(default = "default_out")]
    pub out: PathBuf,

    #[serde(default)]
    pub format: ReportFormat,

    /// Analyze entries on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_ignore_file() -> String {
    depviz_graph::ignore::DEFAULT_IGNORE_FILE.to_string()
}

pub fn default_out() -> PathBuf {
    PathBuf::from("dependency-graph.html")
}

impl Default for DepvizConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            base_dir: None,
            framework: None,
            entries: Vec::new(),
            aliases: BTreeMap::new(),
            ignore_file: default_ignore_file(),
            out: default_out(),
            format: ReportFormat::default(),
            parallel: false,
        }
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::Serialize;

use crate::cli::AnalyzeArgs;
use crate::config::DepvizConfig;
use crate::error::{ConfigError, Result};
use crate::report::ReportFormat;
use depviz_graph::Framework;

/// Config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "depviz.config.json";

/// Environment variables read after the `DEPVIZ_` prefix, lowercased.
const ENV_KEYS: &[&str] = &[
    "root",
    "base_dir",
    "framework",
    "entries",
    "ignore_file",
    "out",
    "format",
    "parallel",
];

/// Flags the user actually passed. Unset fields do not override lower layers.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    framework: Option<Framework>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<PathBuf>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    aliases: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<ReportFormat>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    parallel: bool,
}

impl From<&AnalyzeArgs> for FlagOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            root: args.root.clone(),
            framework: args.framework,
            entries: args.entries.clone(),
            aliases: args.aliases.iter().cloned().collect(),
            out: args.out.clone(),
            format: args.format,
            parallel: args.parallel,
        }
    }
}

/// `DEPVIZ_IGNORE_FILE` → `ignoreFile`: figment hands over the lowercased
/// suffix, the config uses camelCase.
pub fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl DepvizConfig {
    /// Load the configuration for an analyze run.
    ///
    /// The config file is `--config` when given (and must exist), otherwise
    /// `depviz.config.json` in the `--root` directory (or the working
    /// directory) when present.
    pub fn load(args: &AnalyzeArgs) -> Result<Self> {
        let search_dir = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_file = match &args.config {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => Some(search_dir.join(CONFIG_FILE_NAME)).filter(|path| path.is_file()),
        };

        Self::figment(config_file.as_deref(), args)
            .extract()
            .map_err(|e| ConfigError::Invalid { message: e.to_string() }.into())
    }

    fn figment(config_file: Option<&Path>, args: &AnalyzeArgs) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed("DEPVIZ_")
                .filter(|key| ENV_KEYS.contains(&key.as_str()))
                .map(|key| env_key(key.as_str()).into()),
        );

        figment.merge(Serialized::defaults(FlagOverrides::from(args)))
    }

    /// Entry paths made absolute against the root.
    pub fn entry_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|entry| {
                if entry.is_absolute() {
                    entry.clone()
                } else {
                    self.root.join(entry)
                }
            })
            .collect()
    }

    /// Base directory made absolute against the root.
    pub fn base_dir_path(&self) -> Option<PathBuf> {
        self.base_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                self.root.join(dir)
            }
        })
    }
}

#[cfg(test)]
pub(super) fn figment_for_tests(config_file: Option<&Path>, args: &AnalyzeArgs) -> Figment {
    DepvizConfig::figment(config_file, args)
}

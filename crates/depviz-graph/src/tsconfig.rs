//! Minimal tsconfig.json reader.
//!
//! Only `compilerOptions.baseUrl`, `compilerOptions.paths` and `extends`
//! chains are understood. Comments and trailing commas are stripped with
//! `json-strip-comments` before the text reaches serde. A relative `extends`
//! is read next to the config; a package one (`@tsconfig/strictest`) is
//! looked up through `oxc_resolver` in `node_modules`.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use oxc_resolver::{ResolveOptions, Resolver};
use path_clean::PathClean;
use serde::Deserialize;

use crate::error::ConfigError;

const MAX_EXTENDS_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
struct RawTsconfig {
    extends: Option<String>,
    #[serde(default, rename = "compilerOptions")]
    compiler_options: RawCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
struct RawCompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    paths: Option<IndexMap<String, Vec<String>>>,
}

/// Resolved path-mapping options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tsconfig {
    /// Absolute `baseUrl`, if any config in the chain sets one.
    pub base_url: Option<PathBuf>,
    /// `paths` patterns in declaration order.
    pub paths: IndexMap<String, Vec<String>>,
    /// Directory the `paths` targets are relative to.
    pub paths_base: Option<PathBuf>,
}

impl Tsconfig {
    /// Read `dir/tsconfig.json`; an absent file yields `None`.
    pub fn find_in(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join("tsconfig.json");
        if !path.is_file() {
            return Ok(None);
        }
        Self::from_path(&path).map(Some)
    }

    /// Read a tsconfig file and follow its `extends` chain.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path, 0)
    }

    fn load(path: &Path, depth: usize) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidTsconfig {
            path: path.to_path_buf(),
            reason,
        };
        if depth > MAX_EXTENDS_DEPTH {
            return Err(invalid("extends chain is too deep".to_string()));
        }

        let mut text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        json_strip_comments::strip(&mut text).map_err(|e| invalid(e.to_string()))?;
        let raw: RawTsconfig = serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        let dir = path.parent().unwrap_or(Path::new("."));

        let mut config = match raw.extends.as_deref() {
            Some(parent) => match extends_path(dir, parent) {
                Some(parent_path) => Self::load(&parent_path, depth + 1)?,
                None => {
                    tracing::warn!(
                        extends = parent,
                        tsconfig = %path.display(),
                        "Base tsconfig not found; ignoring extends"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        };

        if let Some(base_url) = raw.compiler_options.base_url {
            config.base_url = Some(dir.join(base_url).clean());
        }
        if let Some(paths) = raw.compiler_options.paths {
            config.paths = paths;
            config.paths_base = Some(dir.to_path_buf());
        }
        Ok(config)
    }

    /// Directory `paths` targets resolve against: `baseUrl` when set,
    /// otherwise the directory of the config that declared `paths`.
    pub fn alias_base(&self) -> Option<&Path> {
        self.base_url.as_deref().or(self.paths_base.as_deref())
    }
}

/// File named by an `extends` value, relative to the extending config's
/// directory or inside a package.
fn extends_path(dir: &Path, extends: &str) -> Option<PathBuf> {
    if extends.starts_with('.') || Path::new(extends).is_absolute() {
        let path = dir.join(extends).clean();
        if path.is_file() {
            return Some(path);
        }
        let mut with_json = path.into_os_string();
        with_json.push(".json");
        return Some(PathBuf::from(with_json)).filter(|path| path.is_file());
    }

    let resolver = Resolver::new(ResolveOptions {
        extensions: vec![".json".into()],
        main_files: vec!["tsconfig".into()],
        symlinks: false,
        ..Default::default()
    });
    match resolver.resolve(dir, extends) {
        Ok(resolution) => Some(resolution.path().clean()),
        Err(err) => {
            tracing::debug!(extends, error = %err, "Package tsconfig did not resolve");
            None
        }
    }
}

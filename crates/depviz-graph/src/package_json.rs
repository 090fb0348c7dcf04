//! Package.json parsing and declared-dependency lookup.
//!
//! The resolver only needs to know which package names the project declares,
//! so this focuses on the dependency fields and omits scripts, engines, etc.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::ConfigError;

/// Maximum allowed size for package.json files (10MB)
const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

/// Parsed package.json structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    /// Package name
    pub name: Option<String>,
    /// Production dependencies
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Peer dependencies
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: BTreeMap<String, String>,
    /// Workspace globs (npm/yarn workspaces), either an array or an object.
    #[serde(default)]
    pub workspaces: Option<serde_json::Value>,
    /// File path this was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

impl PackageJson {
    /// Load package.json from a specific path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = fs::metadata(path).map_err(|e| invalid(e.to_string()))?;
        if metadata.len() > MAX_PACKAGE_JSON_SIZE {
            return Err(invalid(format!(
                "exceeds maximum size of {}MB",
                MAX_PACKAGE_JSON_SIZE / 1024 / 1024
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let mut pkg: PackageJson =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        pkg.path = path.to_path_buf();
        Ok(pkg)
    }

    /// Load `dir/package.json` if it exists.
    pub fn find_in(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join("package.json");
        if !path.is_file() {
            return Ok(None);
        }
        Self::from_path(&path).map(Some)
    }

    /// Direct and development dependency names.
    pub fn declared(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }

    /// True when the manifest declares a workspace.
    pub fn is_workspace_root(&self) -> bool {
        self.workspaces.is_some()
    }
}

/// Merged set of dependency names declared by the project and, optionally,
/// the workspace that contains it.
#[derive(Debug, Clone, Default)]
pub struct DeclaredDependencies {
    names: FxHashSet<String>,
}

impl DeclaredDependencies {
    /// Merge the project manifest over the workspace-root manifest.
    pub fn merge(workspace: Option<&PackageJson>, project: &PackageJson) -> Self {
        let mut names = FxHashSet::default();
        if let Some(workspace) = workspace {
            names.extend(workspace.declared().map(str::to_string));
        }
        names.extend(project.declared().map(str::to_string));
        Self { names }
    }

    pub fn from_names(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The declared package an import specifier refers to, if any.
    ///
    /// Matches the full specifier first, then its package name
    /// (`lodash/debounce` → `lodash`, `@scope/pkg/sub` → `@scope/pkg`).
    pub fn external_package(&self, specifier: &str) -> Option<String> {
        if self.contains(specifier) {
            return Some(specifier.to_string());
        }
        package_name(specifier)
            .filter(|name| self.contains(name))
            .map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Package name portion of a bare module specifier.
///
/// Relative, absolute and `node:` specifiers have no package name.
pub fn package_name(specifier: &str) -> Option<&str> {
    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with("node:")
    {
        return None;
    }

    let mut slashes = specifier.match_indices('/').map(|(idx, _)| idx);
    let end = if specifier.starts_with('@') {
        slashes.nth(1)
    } else {
        slashes.next()
    };

    Some(end.map_or(specifier, |idx| &specifier[..idx]))
}

/// Find the closest ancestor of `root` that hosts a workspace.
///
/// A workspace root either has a `pnpm-workspace.yaml` or a package.json
/// with a `workspaces` field. `root` itself is not considered.
pub fn find_workspace_root(root: &Path) -> Option<PathBuf> {
    root.ancestors().skip(1).find_map(|dir| {
        if dir.join("pnpm-workspace.yaml").is_file() {
            return Some(dir.to_path_buf());
        }
        match PackageJson::find_in(dir) {
            Ok(Some(pkg)) if pkg.is_workspace_root() => Some(dir.to_path_buf()),
            _ => None,
        }
    })
}

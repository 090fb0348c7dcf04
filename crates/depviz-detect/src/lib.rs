//! # depviz-detect
//!
//! Works out what kind of front-end project lives in a directory: the UI
//! framework (from `package.json`), the build tool (from config files, then
//! dependencies) and the entry files to analyze (from routing conventions or
//! the bundler config, read statically).
//!
//! ```no_run
//! use std::path::Path;
//!
//! let project = depviz_detect::detect_project(Path::new("."), None)?;
//! println!("{} + {}: {} entries", project.framework, project.build_tool, project.entries.len());
//! # Ok::<(), depviz_detect::DetectError>(())
//! ```

pub mod build_tool;
pub mod bundler_config;
pub mod entries;
pub mod error;
pub mod framework;

pub use build_tool::{detect_build_tool, BuildTool};
pub use entries::detect_entries;
pub use error::{DetectError, Result};
pub use framework::detect_framework;

use std::path::{Path, PathBuf};

use depviz_graph::package_json::find_workspace_root;
use depviz_graph::{paths, ConfigError, DeclaredDependencies, Framework, PackageJson};
use serde::Serialize;

/// Detection outcome for one project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedProject {
    pub root: PathBuf,
    pub framework: Framework,
    pub build_tool: BuildTool,
    /// Absolute entry paths in discovery order.
    pub entries: Vec<PathBuf>,
}

/// Detect framework, build tool and entries under `root`.
pub fn detect_project(root: &Path, framework_override: Option<Framework>) -> Result<DetectedProject> {
    let root = paths::normalize(root);
    if !root.is_dir() {
        return Err(ConfigError::RootNotFound(root).into());
    }

    let dependencies = load_dependencies(&root)?;
    let framework = detect_framework(&dependencies, framework_override);
    let build_tool = detect_build_tool(&root, &dependencies);
    let entries = detect_entries(&root, framework, build_tool)?;

    tracing::info!(%framework, %build_tool, entries = entries.len(), "Detected project");
    Ok(DetectedProject {
        root,
        framework,
        build_tool,
        entries,
    })
}

/// Dependencies of the project manifest merged over the workspace root's.
pub fn load_dependencies(root: &Path) -> Result<DeclaredDependencies> {
    let project =
        PackageJson::find_in(root)?.ok_or_else(|| ConfigError::ManifestNotFound(root.to_path_buf()))?;

    let workspace = match find_workspace_root(root) {
        Some(dir) => PackageJson::find_in(&dir)?,
        None => None,
    };

    Ok(DeclaredDependencies::merge(workspace.as_ref(), &project))
}

use std::fmt;
use std::path::Path;

use depviz_graph::DeclaredDependencies;
use serde::Serialize;

use crate::bundler_config::{read_property, PropertyValue};

/// Bundler driving the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    Webpack,
    Vite,
    Rollup,
    Turbopack,
    Parcel,
    Esbuild,
    #[default]
    Unknown,
}

impl BuildTool {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildTool::Webpack => "webpack",
            BuildTool::Vite => "vite",
            BuildTool::Rollup => "rollup",
            BuildTool::Turbopack => "turbopack",
            BuildTool::Parcel => "parcel",
            BuildTool::Esbuild => "esbuild",
            BuildTool::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) const NEXT_CONFIGS: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];
pub(crate) const VITE_CONFIGS: &[&str] = &["vite.config.ts", "vite.config.js", "vite.config.mjs"];
pub(crate) const WEBPACK_CONFIGS: &[&str] = &["webpack.config.js", "webpack.config.ts"];

const CONFIG_FILES: &[(&[&str], BuildTool)] = &[
    (VITE_CONFIGS, BuildTool::Vite),
    (WEBPACK_CONFIGS, BuildTool::Webpack),
    (&["rollup.config.js", "rollup.config.ts"], BuildTool::Rollup),
    (&["turbopack.config.js", "turbopack.config.ts"], BuildTool::Turbopack),
];

const DEPENDENCY_MARKERS: &[(&str, BuildTool)] = &[
    ("vite", BuildTool::Vite),
    ("webpack", BuildTool::Webpack),
    ("rollup", BuildTool::Rollup),
    ("parcel", BuildTool::Parcel),
    ("esbuild", BuildTool::Esbuild),
    ("@vercel/turbopack", BuildTool::Turbopack),
];

/// First of `names` that exists as a file under `root`.
pub(crate) fn find_config(root: &Path, names: &[&str]) -> Option<std::path::PathBuf> {
    names.iter().map(|name| root.join(name)).find(|path| path.is_file())
}

/// Detect the build tool: config files first, then declared dependencies.
pub fn detect_build_tool(root: &Path, dependencies: &DeclaredDependencies) -> BuildTool {
    if let Some(next_config) = find_config(root, NEXT_CONFIGS) {
        return if next_enables_turbo(&next_config) {
            BuildTool::Turbopack
        } else {
            BuildTool::Webpack
        };
    }

    for (names, tool) in CONFIG_FILES {
        if find_config(root, names).is_some() {
            return *tool;
        }
    }

    DEPENDENCY_MARKERS
        .iter()
        .find(|(package, _)| dependencies.contains(package))
        .map(|(_, tool)| *tool)
        .unwrap_or(BuildTool::Unknown)
}

/// `experimental.turbo` set to `true` or to an options object.
fn next_enables_turbo(config: &Path) -> bool {
    match read_property(config, &["experimental", "turbo"]) {
        Ok(Some(PropertyValue::Bool(enabled))) => enabled,
        Ok(Some(PropertyValue::Object | PropertyValue::Strings(_))) => true,
        Ok(_) => false,
        Err(err) => {
            tracing::warn!(error = %err, "Could not read Next.js config; assuming webpack");
            false
        }
    }
}

//! Entry file discovery.
//!
//! Conventions are checked in order: Next.js routes, Nuxt (unsupported),
//! Taro app config, then the webpack `entry` and the vite
//! `build.rollupOptions.input` of the bundler config. Every returned path is
//! absolute and exists.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use depviz_graph::{paths, Framework};
use regex::Regex;
use walkdir::WalkDir;

use crate::build_tool::{find_config, BuildTool, VITE_CONFIGS, WEBPACK_CONFIGS};
use crate::bundler_config::read_property;
use crate::error::{DetectError, Result};

/// Route directories of a Next.js app, first existing one wins.
const NEXT_ROUTE_DIRS: &[&str] = &["app", "pages", "src/app", "src/pages"];
const NEXT_ROUTE_EXTENSIONS: &[&str] = &["tsx", "jsx"];

const TARO_APP_FILES: &[&str] = &["src/app.tsx", "src/app.ts"];
const TARO_APP_CONFIGS: &[&str] = &["src/app.config.ts", "src/app.config.json"];

/// `pages: [ ... ]` in a Taro app config, quoted key or not.
static TARO_PAGES: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"["']?pages["']?\s*:\s*\[([^\]]+)\]"#).ok());

/// Find the entry files for a framework and build tool.
pub fn detect_entries(
    root: &Path,
    framework: Framework,
    build_tool: BuildTool,
) -> Result<Vec<PathBuf>> {
    let entries = match (framework, build_tool) {
        (Framework::Next, _) => next_entries(root),
        (Framework::Nuxt, _) => return Err(DetectError::NuxtUnsupported),
        (Framework::Taro, _) => taro_entries(root)?,
        (_, BuildTool::Webpack) => bundler_entries(root, WEBPACK_CONFIGS, &["entry"])?,
        (_, BuildTool::Vite) => {
            bundler_entries(root, VITE_CONFIGS, &["build", "rollupOptions", "input"])?
        }
        _ => Vec::new(),
    };

    if entries.is_empty() {
        return Err(DetectError::NoEntries {
            framework,
            build_tool,
        });
    }

    tracing::debug!(%framework, %build_tool, count = entries.len(), "Detected entries");
    Ok(entries)
}

/// Every `.tsx`/`.jsx` file under the first existing route directory.
fn next_entries(root: &Path) -> Vec<PathBuf> {
    let Some(dir) = NEXT_ROUTE_DIRS
        .iter()
        .map(|dir| root.join(dir))
        .find(|dir| dir.is_dir())
    else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable route entry");
                continue;
            }
        };
        let is_route = entry.file_type().is_file()
            && paths::extension(entry.path())
                .is_some_and(|ext| NEXT_ROUTE_EXTENSIONS.contains(&ext.as_str()));
        if is_route {
            entries.push(entry.into_path());
        }
    }
    entries
}

/// `src/app.tsx`/`src/app.ts` plus the pages listed in the app config.
fn taro_entries(root: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = TARO_APP_FILES
        .iter()
        .map(|file| root.join(file))
        .filter(|path| path.is_file())
        .collect();

    if let Some(config) = find_config(root, TARO_APP_CONFIGS) {
        let source = fs::read_to_string(&config).map_err(|source| DetectError::ReadFile {
            path: config.clone(),
            source,
        })?;
        for page in taro_pages(&source) {
            let path = root.join("src").join(format!("{page}.tsx"));
            if path.is_file() {
                push_unique(&mut entries, path);
            } else {
                tracing::debug!(page = %page, "Taro page listed in app config does not exist");
            }
        }
    }

    Ok(entries)
}

/// Page paths from a Taro app config, quotes stripped.
fn taro_pages(source: &str) -> Vec<String> {
    let Some(captures) = TARO_PAGES.as_ref().and_then(|re| re.captures(source)) else {
        return Vec::new();
    };

    captures[1]
        .split(',')
        .map(|page| page.trim().trim_matches(|c| matches!(c, '\'' | '"' | '`')).trim())
        .filter(|page| !page.is_empty())
        .map(str::to_string)
        .collect()
}

/// Entries named in a bundler config, resolved against the project root.
fn bundler_entries(root: &Path, configs: &[&str], key_path: &[&str]) -> Result<Vec<PathBuf>> {
    let Some(config) = find_config(root, configs) else {
        return Ok(Vec::new());
    };

    let Some(value) = read_property(&config, key_path)? else {
        tracing::debug!(config = %config.display(), key = %key_path.join("."), "No entry property in bundler config");
        return Ok(Vec::new());
    };

    let mut entries = Vec::new();
    for entry in value.strings() {
        let path = paths::normalize(&root.join(entry));
        if path.is_file() {
            push_unique(&mut entries, path);
        } else {
            tracing::warn!(entry = %entry, config = %config.display(), "Bundler entry does not exist");
        }
    }
    Ok(entries)
}

fn push_unique(entries: &mut Vec<PathBuf>, path: PathBuf) {
    if !entries.contains(&path) {
        entries.push(path);
    }
}

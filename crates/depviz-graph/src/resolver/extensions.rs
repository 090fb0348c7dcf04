//! Extension and index-file probing for module files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashMap;

/// Source extensions tried when a specifier has none, in priority order.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts", "js", "jsx", "mjs", "cjs"];

/// Memoized probe results for one run, keyed by the probed base path.
#[derive(Debug, Default)]
pub struct ResolverCache {
    probes: FxHashMap<PathBuf, Option<PathBuf>>,
    hits: usize,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `base`, reusing an earlier answer for the same path.
    pub fn probe(&mut self, base: &Path) -> Option<PathBuf> {
        if let Some(found) = self.probes.get(base) {
            self.hits += 1;
            return found.clone();
        }
        let found = probe_file(base);
        self.probes.insert(base.to_path_buf(), found.clone());
        found
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Number of probes answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Find an existing file for `base`.
///
/// Tries the literal path, then each source extension appended (so
/// `api.service` becomes `api.service.ts`, not `api.ts`), then
/// `index.<ext>` inside it.
pub fn probe_file(base: &Path) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.clean());
    }

    for ext in SOURCE_EXTENSIONS {
        let candidate = with_appended_extension(base, ext);
        if candidate.is_file() {
            return Some(candidate.clean());
        }
    }

    if base.is_dir() {
        for ext in SOURCE_EXTENSIONS {
            let index = base.join(format!("index.{ext}"));
            if index.is_file() {
                return Some(index.clean());
            }
        }
    }

    None
}

fn with_appended_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

//! Mutable state of one traversal run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::node::DependencyNode;
use crate::parser::ModuleStore;
use crate::resolver::ResolverCache;

/// Caches and the active path for one run.
///
/// `active` holds the files currently being expanded (an ancestor is
/// resolving them right now) and only serves cycle detection. `completed`
/// holds fully built children and only serves reuse. A file is never in
/// both at once.
#[derive(Debug, Default)]
pub struct Traversal {
    pub(crate) modules: ModuleStore,
    pub(crate) probes: ResolverCache,
    completed: FxHashMap<PathBuf, Arc<[DependencyNode]>>,
    active: FxHashSet<PathBuf>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn completed(&self, file: &Path) -> Option<Arc<[DependencyNode]>> {
        self.completed.get(file).cloned()
    }

    pub(crate) fn is_active(&self, file: &Path) -> bool {
        self.active.contains(file)
    }

    pub(crate) fn enter(&mut self, file: &Path) {
        self.active.insert(file.to_path_buf());
    }

    pub(crate) fn leave(&mut self, file: &Path) {
        self.active.remove(file);
    }

    pub(crate) fn complete(&mut self, file: &Path, children: Arc<[DependencyNode]>) {
        self.completed.insert(file.to_path_buf(), children);
    }

    /// Number of files whose children have been built.
    pub fn files_expanded(&self) -> usize {
        self.completed.len()
    }

    /// Number of modules parsed so far.
    pub fn modules_parsed(&self) -> usize {
        self.modules.len()
    }

    /// Depth of the active path (0 between entries).
    pub fn active_depth(&self) -> usize {
        self.active.len()
    }
}

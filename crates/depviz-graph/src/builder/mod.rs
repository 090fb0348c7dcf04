//! Dependency tree construction.
//!
//! For each entry the builder walks imports depth first: resolve the edge,
//! classify the binding, and expand the target file only when the category
//! is component, hook, function or const. Every other outcome is a leaf.
//!
//! A [`Traversal`] carries the per-run state. Sequential forests share one
//! traversal so subtrees are reused across entries; parallel forests give
//! every entry its own.

mod traversal;

pub use traversal::Traversal;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::classifier::SymbolClassifier;
use crate::config::ProjectConfig;
use crate::error::{GraphError, Result};
use crate::handler::{handler_for, EdgeHandler};
use crate::node::{Category, DependencyNode};
use crate::parser::ModuleEdge;
use crate::paths;
use crate::resolver::{ModuleResolver, ResolvedTarget};

/// Emitted once per finished entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestProgress {
    /// Entries finished so far, this one included.
    pub completed: usize,
    pub total: usize,
    pub entry: PathBuf,
}

/// Builds dependency trees for one project configuration.
pub struct GraphBuilder<'c> {
    config: &'c ProjectConfig,
    resolver: ModuleResolver<'c>,
    handler: Box<dyn EdgeHandler>,
}

impl<'c> GraphBuilder<'c> {
    /// Builder using the edge handler of the configured framework.
    pub fn new(config: &'c ProjectConfig) -> Self {
        Self::with_handler(config, handler_for(config.framework))
    }

    pub fn with_handler(config: &'c ProjectConfig, handler: Box<dyn EdgeHandler>) -> Self {
        Self {
            config,
            resolver: ModuleResolver::new(config),
            handler,
        }
    }

    pub fn config(&self) -> &'c ProjectConfig {
        self.config
    }

    pub fn resolver(&self) -> &ModuleResolver<'c> {
        &self.resolver
    }

    /// Build the tree for one entry with a fresh traversal.
    pub fn build_tree(&self, entry: &Path) -> DependencyNode {
        self.build_tree_in(entry, &mut Traversal::new())
    }

    /// Build the tree for one entry, reusing `traversal`'s caches.
    pub fn build_tree_in(&self, entry: &Path, traversal: &mut Traversal) -> DependencyNode {
        let entry = paths::normalize(entry);
        let children = match self.expand(&entry, traversal) {
            Ok(children) => children,
            Err(err) => {
                tracing::warn!(error = %err, "Entry could not be analyzed");
                Arc::from(Vec::new())
            }
        };
        DependencyNode::with_children(
            paths::file_name(&entry),
            Category::Entry,
            self.config.display_path(&entry),
            children,
        )
    }

    /// Build one tree per entry, in order, sharing one traversal.
    pub fn build_forest<F>(&self, entries: &[PathBuf], mut progress: F) -> Result<Vec<DependencyNode>>
    where
        F: FnMut(ForestProgress),
    {
        if entries.is_empty() {
            return Err(GraphError::NoEntries);
        }

        let started = Instant::now();
        let mut traversal = Traversal::new();
        let mut trees = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            trees.push(self.build_tree_in(entry, &mut traversal));
            progress(ForestProgress {
                completed: index + 1,
                total: entries.len(),
                entry: entry.clone(),
            });
        }

        tracing::info!(
            entries = entries.len(),
            modules = traversal.modules_parsed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built dependency forest"
        );
        Ok(trees)
    }

    /// Build one tree per entry on the rayon pool.
    ///
    /// Each entry gets an independent traversal. Trees come back in input
    /// order; progress events are serialized and `completed` only grows.
    pub fn build_forest_parallel<F>(
        &self,
        entries: &[PathBuf],
        progress: F,
    ) -> Result<Vec<DependencyNode>>
    where
        F: FnMut(ForestProgress) + Send,
    {
        if entries.is_empty() {
            return Err(GraphError::NoEntries);
        }

        let started = Instant::now();
        let total = entries.len();
        let progress = Mutex::new((0usize, progress));

        let trees: Vec<DependencyNode> = entries
            .par_iter()
            .map(|entry| {
                let tree = self.build_tree(entry);
                let mut guard = progress.lock();
                let (completed, callback) = &mut *guard;
                *completed += 1;
                callback(ForestProgress {
                    completed: *completed,
                    total,
                    entry: entry.clone(),
                });
                tree
            })
            .collect();

        tracing::info!(
            entries = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built dependency forest in parallel"
        );
        Ok(trees)
    }

    /// Children of `file`, from the cache or freshly built.
    fn expand(&self, file: &Path, traversal: &mut Traversal) -> Result<Arc<[DependencyNode]>> {
        if let Some(children) = traversal.completed(file) {
            return Ok(children);
        }

        let edges = self.handler.edges(file, &mut traversal.modules)?;

        traversal.enter(file);
        let children: Vec<DependencyNode> = edges
            .iter()
            .map(|edge| self.edge_node(file, edge, traversal))
            .collect();
        traversal.leave(file);

        let children: Arc<[DependencyNode]> = Arc::from(children);
        traversal.complete(file, Arc::clone(&children));
        Ok(children)
    }

    /// Node for one edge of `importer`.
    fn edge_node(&self, importer: &Path, edge: &ModuleEdge, traversal: &mut Traversal) -> DependencyNode {
        let target = self
            .resolver
            .resolve(&edge.specifier, importer, &mut traversal.probes);
        tracing::debug!(
            from = %importer.display(),
            specifier = %edge.specifier,
            %target,
            "Resolved edge"
        );

        let file = match target {
            ResolvedTarget::Unresolved => {
                return DependencyNode::leaf(&edge.name, Category::Unknown, &edge.specifier);
            }
            ResolvedTarget::External(package) => {
                return DependencyNode::leaf(&edge.name, Category::External, package);
            }
            ResolvedTarget::File(file) => file,
        };

        if self.config.is_ignored(&file) {
            return DependencyNode::leaf(&edge.name, Category::Ignored, &edge.specifier);
        }

        let display = self.config.display_path(&file);
        let classifier = SymbolClassifier::new(&self.resolver);
        let category = classifier
            .classify(
                &file,
                &edge.name,
                &edge.request,
                &mut traversal.modules,
                &mut traversal.probes,
            )
            .category;

        if !category.is_expandable() {
            return DependencyNode::leaf(&edge.name, category, display);
        }
        if traversal.is_active(&file) {
            return DependencyNode::leaf(&edge.name, Category::Circular, display);
        }

        match self.expand(&file, traversal) {
            Ok(children) => DependencyNode::with_children(&edge.name, category, display, children),
            Err(err) => {
                tracing::warn!(error = %err, "Dependency could not be analyzed");
                DependencyNode::leaf(&edge.name, Category::Unknown, display)
            }
        }
    }
}

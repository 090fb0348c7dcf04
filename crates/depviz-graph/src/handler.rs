//! Per-framework edge enumeration.
//!
//! The builder asks an [`EdgeHandler`] for the ordered dependency edges of a
//! file. React-family sources are plain ES modules; Vue single-file
//! components are not analyzed yet and produce no edges.

use std::path::Path;

use crate::error::Result;
use crate::framework::Framework;
use crate::parser::{ModuleEdge, ModuleStore};

/// Produces the dependency edges of one file, in discovery order.
pub trait EdgeHandler: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Edges of `file`: imports in source order, then re-exports.
    ///
    /// An error means the file could not be loaded; the builder turns it
    /// into an `unknown` leaf.
    fn edges(&self, file: &Path, modules: &mut ModuleStore) -> Result<Vec<ModuleEdge>>;
}

/// ES module imports and re-exports (`react`, `next`, `taro`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptEdgeHandler;

impl EdgeHandler for ScriptEdgeHandler {
    fn name(&self) -> &'static str {
        "script"
    }

    fn edges(&self, file: &Path, modules: &mut ModuleStore) -> Result<Vec<ModuleEdge>> {
        let module = modules.get_or_load(file)?;
        Ok(module.edges.clone())
    }
}

/// Vue single-file components. Returns no edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct VueEdgeHandler;

impl EdgeHandler for VueEdgeHandler {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn edges(&self, _file: &Path, _modules: &mut ModuleStore) -> Result<Vec<ModuleEdge>> {
        Ok(Vec::new())
    }
}

/// Frameworks without dependency support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEdgeHandler;

impl EdgeHandler for NoopEdgeHandler {
    fn name(&self) -> &'static str {
        "none"
    }

    fn edges(&self, _file: &Path, _modules: &mut ModuleStore) -> Result<Vec<ModuleEdge>> {
        Ok(Vec::new())
    }
}

/// Pick the handler for a framework.
pub fn handler_for(framework: Framework) -> Box<dyn EdgeHandler> {
    if framework.is_react_family() {
        Box::new(ScriptEdgeHandler)
    } else if framework.is_vue_family() {
        tracing::info!(%framework, "Vue components are not analyzed; entries will have no dependencies");
        Box::new(VueEdgeHandler)
    } else {
        tracing::warn!(%framework, "No dependency support for this framework; entries will have no dependencies");
        Box::new(NoopEdgeHandler)
    }
}

//! # depviz-graph
//!
//! Dependency graph engine for front-end projects.
//!
//! Starting from entry files, the engine resolves every import and
//! re-export, classifies what each imported symbol is (component, hook,
//! function, constant, type, asset, package, ...) and returns one
//! [`DependencyNode`] tree per entry.
//!
//! ## Architecture
//!
//! ```text
//!   GraphBuilder ──▶ ModuleResolver ──▶ SymbolClassifier
//!        ▲                                     │
//!        └──────────── expand target ◀─────────┘
//! ```
//!
//! - [`ProjectConfig`] is loaded once per run (manifests, tsconfig, ignore
//!   rules) and shared read-only.
//! - [`Traversal`] owns the per-run caches and the active path.
//! - File-level failures become `unknown` leaves; only configuration errors
//!   are returned to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use depviz_graph::{Framework, GraphBuilder, ProjectConfig};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProjectConfig::builder("./my-app")
//!     .framework(Framework::React)
//!     .alias("@", "src")
//!     .build()?;
//!
//! let builder = GraphBuilder::new(&config);
//! let entries = vec![PathBuf::from("./my-app/src/main.tsx")];
//! let trees = builder.build_forest(&entries, |p| println!("{}/{}", p.completed, p.total))?;
//! println!("{}", serde_json::to_string_pretty(&trees)?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod framework;
pub mod handler;
pub mod ignore;
pub mod node;
pub mod package_json;
pub mod parser;
pub mod paths;
pub mod resolver;
pub mod tsconfig;

pub use builder::{ForestProgress, GraphBuilder, Traversal};
pub use classifier::{Classification, FallbackReason, SymbolClassifier};
pub use config::{PathAlias, ProjectConfig, ProjectConfigBuilder};
pub use error::{ConfigError, GraphError, Result};
pub use framework::Framework;
pub use handler::{EdgeHandler, NoopEdgeHandler, ScriptEdgeHandler, VueEdgeHandler};
pub use ignore::IgnoreMatcher;
pub use node::{Category, CollapsedTree, DependencyNode, SeenSubtrees};
pub use package_json::{DeclaredDependencies, PackageJson};
pub use parser::{ImportRequest, ModuleEdge, ModuleInfo, ModuleStore};
pub use resolver::{ModuleResolver, ResolvedTarget, ResolverCache};

#[cfg(test)]
mod tests;

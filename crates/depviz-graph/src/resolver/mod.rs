//! Module resolution.
//!
//! Turns an import specifier plus the file containing it into a
//! [`ResolvedTarget`]. Rules are tried in a fixed order and the first match
//! wins:
//!
//! 1. declared dependency → `External`
//! 2. path alias, probing the substituted path
//! 3. `baseUrl` probe for bare specifiers, then `oxc_resolver`
//! 4. exact file next to the importer (styles, images, ...)
//! 5. `Unresolved`
//!
//! Resolution never fails; filesystem errors count as "does not exist".

mod algorithm;
mod aliases;
mod extensions;

pub use algorithm::{is_bare, resolve_exact_file, ResolvedTarget};
pub use aliases::resolve_path_alias;
pub use extensions::{probe_file, ResolverCache, SOURCE_EXTENSIONS};

use std::path::Path;

use oxc_resolver::{ResolveOptions, Resolver};
use path_clean::PathClean;

use crate::config::ProjectConfig;
use crate::package_json::package_name;
use crate::paths;

/// Resolver bound to one project configuration.
///
/// Holds no per-run state; probe results live in the [`ResolverCache`]
/// passed to [`ModuleResolver::resolve`].
pub struct ModuleResolver<'c> {
    config: &'c ProjectConfig,
    resolver: Resolver,
}

impl<'c> ModuleResolver<'c> {
    pub fn new(config: &'c ProjectConfig) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            condition_names: vec!["import".into(), "module".into(), "default".into()],
            extensions: SOURCE_EXTENSIONS.iter().map(|ext| format!(".{ext}")).collect(),
            extension_alias: vec![(
                ".js".into(),
                vec![".ts".into(), ".tsx".into(), ".js".into()],
            )],
            symlinks: false,
            ..Default::default()
        });

        Self { config, resolver }
    }

    pub fn config(&self) -> &'c ProjectConfig {
        self.config
    }

    /// Resolve `specifier` as written in `from`.
    pub fn resolve(
        &self,
        specifier: &str,
        from: &Path,
        cache: &mut ResolverCache,
    ) -> ResolvedTarget {
        if let Some(name) = self.config.dependencies.external_package(specifier) {
            return ResolvedTarget::External(name);
        }

        if let Some(file) = resolve_path_alias(specifier, &self.config.aliases, cache) {
            return ResolvedTarget::File(file);
        }

        if let Some(target) = self.resolve_module(specifier, from, cache) {
            return target;
        }

        if let Some(file) = resolve_exact_file(specifier, from) {
            return ResolvedTarget::File(file);
        }

        ResolvedTarget::Unresolved
    }

    fn resolve_module(
        &self,
        specifier: &str,
        from: &Path,
        cache: &mut ResolverCache,
    ) -> Option<ResolvedTarget> {
        if let Some(base_url) = self.config.base_url.as_ref().filter(|_| is_bare(specifier)) {
            if let Some(file) = cache.probe(&base_url.join(specifier)) {
                return Some(ResolvedTarget::File(file));
            }
        }

        let dir = algorithm::containing_dir(from);
        match self.resolver.resolve(dir, specifier) {
            Ok(resolution) => {
                let path = resolution.path().clean();
                if paths::is_in_node_modules(&path) {
                    let name = package_name(specifier).unwrap_or(specifier);
                    return Some(ResolvedTarget::External(name.to_string()));
                }
                Some(ResolvedTarget::File(path))
            }
            Err(err) => {
                tracing::trace!(specifier, from = %from.display(), error = %err, "Module resolution failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_declared_dependency_wins_over_alias() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", r#"{ "dependencies": { "@ui/kit": "1" } }"#);
        write(root, "src/kit/index.ts", "export const x = 1;");
        let config = ProjectConfig::builder(root).alias("@ui", "src").build().unwrap();
        let resolver = ModuleResolver::new(&config);
        let mut cache = ResolverCache::new();
        let from = config.root.join("src/App.tsx");

        assert_eq!(
            resolver.resolve("@ui/kit", &from, &mut cache),
            ResolvedTarget::External("@ui/kit".into())
        );
    }

    #[test]
    fn test_relative_and_unresolved() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", "{}");
        write(root, "src/Button.tsx", "export default function Button() {}");
        let config = ProjectConfig::load(root).unwrap();
        let resolver = ModuleResolver::new(&config);
        let mut cache = ResolverCache::new();
        let from = config.root.join("src/App.tsx");

        assert_eq!(
            resolver.resolve("./Button", &from, &mut cache),
            ResolvedTarget::File(config.root.join("src/Button.tsx"))
        );
        assert_eq!(resolver.resolve("./Missing", &from, &mut cache), ResolvedTarget::Unresolved);
        assert_eq!(resolver.resolve("node:fs", &from, &mut cache), ResolvedTarget::Unresolved);
    }

    #[test]
    fn test_undeclared_node_module_is_external() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", "{}");
        write(root, "node_modules/left-pad/package.json", r#"{ "name": "left-pad", "main": "index.js" }"#);
        write(root, "node_modules/left-pad/index.js", "module.exports = 1;");
        let from = write(root, "src/a.ts", "import pad from 'left-pad';");
        let config = ProjectConfig::load(root).unwrap();
        let resolver = ModuleResolver::new(&config);
        let mut cache = ResolverCache::new();

        assert_eq!(
            resolver.resolve("left-pad", &from, &mut cache),
            ResolvedTarget::External("left-pad".into())
        );
    }

    #[test]
    fn test_base_url_probe() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", "{}");
        write(root, "tsconfig.json", r#"{ "compilerOptions": { "baseUrl": "src" } }"#);
        write(root, "src/utils/format.ts", "export const f = 1;");
        let config = ProjectConfig::load(root).unwrap();
        let resolver = ModuleResolver::new(&config);
        let mut cache = ResolverCache::new();

        assert_eq!(
            resolver.resolve("utils/format", &config.root.join("src/pages/a.tsx"), &mut cache),
            ResolvedTarget::File(config.root.join("src/utils/format.ts"))
        );
    }

    #[test]
    fn test_asset_fallback() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "package.json", "{}");
        write(root, "src/app.module.scss", ".a {}");
        let config = ProjectConfig::load(root).unwrap();
        let resolver = ModuleResolver::new(&config);
        let mut cache = ResolverCache::new();

        assert_eq!(
            resolver.resolve("./app.module.scss", &config.root.join("src/App.tsx"), &mut cache),
            ResolvedTarget::File(config.root.join("src/app.module.scss"))
        );
    }
}

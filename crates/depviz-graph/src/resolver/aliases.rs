//! Path alias handling for module resolution.
//!
//! This module handles resolution of path aliases (e.g., "@/*" → "./src/*").

use std::path::PathBuf;

use super::extensions::ResolverCache;
use crate::config::PathAlias;

/// Resolve `specifier` through the first alias whose substitution exists.
///
/// `aliases` must already be sorted longest prefix first. An alias that
/// matches but yields no file does not stop the search.
pub fn resolve_path_alias(
    specifier: &str,
    aliases: &[PathAlias],
    cache: &mut ResolverCache,
) -> Option<PathBuf> {
    aliases.iter().find_map(|alias| {
        let base = alias.apply(specifier)?;
        let found = cache.probe(&base);
        if found.is_none() {
            tracing::trace!(specifier, alias = %alias.pattern, "Alias matched but no file exists");
        }
        found
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_falls_through_to_next_alias() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/ui")).unwrap();
        fs::write(root.join("src/ui/Card.tsx"), "").unwrap();

        let aliases = vec![
            PathAlias::configured("@/ui", "packages/ui", root).unwrap(),
            PathAlias::configured("@", "src", root).unwrap(),
        ];
        let mut cache = ResolverCache::new();

        let found = resolve_path_alias("@/ui/Card", &aliases, &mut cache);
        assert_eq!(found.as_deref(), Some(root.join("src/ui/Card.tsx").as_path()));
        assert_eq!(resolve_path_alias("lodash", &aliases, &mut cache), None);
        assert!(resolve_path_alias("@/nope", &aliases, &mut cache).is_none());
    }
}

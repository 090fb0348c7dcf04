//! Per-run project configuration.
//!
//! [`ProjectConfig`] is assembled once at the start of a run and then only
//! read. All of the configuration I/O (manifests, tsconfig, ignore file)
//! happens in [`ProjectConfigBuilder::build`].

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::framework::Framework;
use crate::ignore::{IgnoreMatcher, DEFAULT_IGNORE_FILE};
use crate::package_json::{find_workspace_root, DeclaredDependencies, PackageJson};
use crate::paths;
use crate::tsconfig::Tsconfig;

/// A prefix substitution applied to import specifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAlias {
    /// Pattern as written by the user or in tsconfig (`@/*`).
    pub pattern: String,
    /// Literal prefix the specifier must start with (`@/`).
    pub prefix: String,
    /// Absolute directory or file the prefix maps to.
    pub target: PathBuf,
    /// Prefix match (`true`) or whole-specifier match.
    pub wildcard: bool,
}

impl PathAlias {
    /// An alias given on the command line or in depviz.config.json.
    ///
    /// These always match by prefix: `@` → `src` maps `@/ui/Button` to
    /// `src/ui/Button`. A relative target resolves against `base`.
    pub fn configured(pattern: &str, target: &str, base: &Path) -> Result<Self, ConfigError> {
        let prefix = pattern.trim().trim_end_matches('*');
        let target = target.trim().trim_end_matches('*');
        validate(pattern, prefix, target)?;

        Ok(Self {
            pattern: pattern.trim().to_string(),
            prefix: prefix.to_string(),
            target: paths::normalize(&base.join(target)),
            wildcard: true,
        })
    }

    /// A `compilerOptions.paths` entry. Only the first target is used.
    ///
    /// Returns `Ok(None)` for the catch-all `*` pattern, which is covered by
    /// `baseUrl` probing instead.
    pub fn from_tsconfig(
        pattern: &str,
        targets: &[String],
        base: &Path,
    ) -> Result<Option<Self>, ConfigError> {
        let wildcard = pattern.ends_with('*');
        let prefix = pattern.trim_end_matches('*');
        if prefix.is_empty() {
            tracing::debug!(pattern, "Skipping catch-all tsconfig path");
            return Ok(None);
        }
        let target = targets
            .first()
            .map(|t| t.trim_end_matches('*'))
            .unwrap_or_default();
        validate(pattern, prefix, target)?;

        Ok(Some(Self {
            pattern: pattern.to_string(),
            prefix: prefix.to_string(),
            target: paths::normalize(&base.join(target)),
            wildcard,
        }))
    }

    /// Substitute the alias into `specifier`, if it applies.
    pub fn apply(&self, specifier: &str) -> Option<PathBuf> {
        if !self.wildcard {
            return (specifier == self.prefix).then(|| self.target.clone());
        }
        let rest = specifier.strip_prefix(&self.prefix)?;
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            Some(self.target.clone())
        } else {
            Some(self.target.join(rest))
        }
    }
}

fn validate(pattern: &str, prefix: &str, target: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidAlias {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };
    if prefix.is_empty() {
        return Err(invalid("pattern is empty"));
    }
    if target.is_empty() {
        return Err(invalid("target is empty"));
    }
    Ok(())
}

/// Immutable configuration shared by every component of a run.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Absolute project root.
    pub root: PathBuf,
    /// Base for the relative `sourcePath` of nodes.
    pub base_dir: PathBuf,
    /// Outer workspace whose manifest is merged under the project one.
    pub workspace_root: Option<PathBuf>,
    pub framework: Framework,
    /// Longest prefix first.
    pub aliases: Vec<PathAlias>,
    /// tsconfig `baseUrl`, used for bare-specifier probing.
    pub base_url: Option<PathBuf>,
    pub dependencies: DeclaredDependencies,
    pub ignore: IgnoreMatcher,
}

impl ProjectConfig {
    /// Load configuration for `root` with every option at its default.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder(root).build()
    }

    pub fn builder(root: impl AsRef<Path>) -> ProjectConfigBuilder {
        ProjectConfigBuilder::new(root.as_ref())
    }

    /// Path of `file` relative to the project root, for ignore matching.
    pub fn is_ignored(&self, file: &Path) -> bool {
        match file.strip_prefix(&self.root) {
            Ok(relative) => self.ignore.is_ignored(relative),
            Err(_) => false,
        }
    }

    /// Path of `file` as presented in nodes.
    pub fn display_path(&self, file: &Path) -> String {
        paths::relative_slash(file, &self.base_dir)
    }
}

/// Builder for [`ProjectConfig`].
#[derive(Debug, Clone)]
pub struct ProjectConfigBuilder {
    root: PathBuf,
    base_dir: Option<PathBuf>,
    workspace_root: Option<PathBuf>,
    framework: Framework,
    aliases: Vec<(String, String)>,
    ignore_file: String,
    read_tsconfig: bool,
}

impl ProjectConfigBuilder {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            base_dir: None,
            workspace_root: None,
            framework: Framework::default(),
            aliases: Vec::new(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            read_tsconfig: true,
        }
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn workspace_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(dir.into());
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = framework;
        self
    }

    /// Add an alias; configured aliases win over tsconfig ones of equal length.
    pub fn alias(mut self, pattern: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((pattern.into(), target.into()));
        self
    }

    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Skip reading tsconfig.json.
    pub fn without_tsconfig(mut self) -> Self {
        self.read_tsconfig = false;
        self
    }

    pub fn build(self) -> Result<ProjectConfig, ConfigError> {
        let root = paths::normalize(&self.root);
        if !root.is_dir() {
            return Err(ConfigError::RootNotFound(root));
        }

        let project = PackageJson::find_in(&root)?
            .ok_or_else(|| ConfigError::ManifestNotFound(root.clone()))?;

        let workspace_root = self
            .workspace_root
            .map(|dir| paths::normalize(&dir))
            .or_else(|| find_workspace_root(&root));
        let workspace = match &workspace_root {
            Some(dir) => PackageJson::find_in(dir)?,
            None => None,
        };
        let dependencies = DeclaredDependencies::merge(workspace.as_ref(), &project);

        let mut aliases = Vec::new();
        for (pattern, target) in &self.aliases {
            aliases.push(PathAlias::configured(pattern, target, &root)?);
        }

        let tsconfig = if self.read_tsconfig {
            Tsconfig::find_in(&root)?
        } else {
            None
        };
        let base_url = tsconfig.as_ref().and_then(|ts| ts.base_url.clone());
        if let Some(ts) = &tsconfig {
            let base = ts.alias_base().unwrap_or(&root);
            for (pattern, targets) in &ts.paths {
                aliases.extend(PathAlias::from_tsconfig(pattern, targets, base)?);
            }
        }
        // Stable, so equal-length prefixes keep configured-then-tsconfig order.
        aliases.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        let ignore = IgnoreMatcher::load(&root, &self.ignore_file)?;
        let base_dir = self
            .base_dir
            .map(|dir| paths::normalize(&dir))
            .unwrap_or_else(|| root.clone());

        tracing::debug!(
            root = %root.display(),
            framework = %self.framework,
            aliases = aliases.len(),
            dependencies = dependencies.len(),
            workspace = ?workspace_root,
            "Loaded project configuration"
        );

        Ok(ProjectConfig {
            root,
            base_dir,
            workspace_root,
            framework: self.framework,
            aliases,
            base_url,
            dependencies,
            ignore,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "dependencies": { "react": "18" } }"#,
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_missing_manifest_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestNotFound(_)));
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let temp = TempDir::new().unwrap();
        let err = ProjectConfig::load(temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotFound(_)));
    }

    #[test]
    fn test_configured_alias_prefix() {
        let alias = PathAlias::configured("@", "src", Path::new("/p")).unwrap();
        assert_eq!(alias.apply("@/ui/Button"), Some(PathBuf::from("/p/src/ui/Button")));
        assert_eq!(alias.apply("@"), Some(PathBuf::from("/p/src")));
        assert_eq!(alias.apply("./x"), None);
    }

    #[test]
    fn test_exact_tsconfig_alias() {
        let alias = PathAlias::from_tsconfig("config", &["src/config.ts".into()], Path::new("/p"))
            .unwrap()
            .unwrap();
        assert!(!alias.wildcard);
        assert_eq!(alias.apply("config"), Some(PathBuf::from("/p/src/config.ts")));
        assert_eq!(alias.apply("config/extra"), None);
    }

    #[test]
    fn test_invalid_aliases() {
        assert!(matches!(
            PathAlias::configured("", "src", Path::new("/p")),
            Err(ConfigError::InvalidAlias { .. })
        ));
        assert!(matches!(
            PathAlias::configured("@", " ", Path::new("/p")),
            Err(ConfigError::InvalidAlias { .. })
        ));
        assert!(matches!(
            PathAlias::from_tsconfig("@/*", &[], Path::new("/p")),
            Err(ConfigError::InvalidAlias { .. })
        ));
        assert_eq!(PathAlias::from_tsconfig("*", &["*".into()], Path::new("/p")).unwrap(), None);
    }

    #[test]
    fn test_aliases_sorted_longest_first() {
        let temp = project();
        fs::write(
            temp.path().join("tsconfig.json"),
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"], "@/ui/*": ["packages/ui/*"] } } }"#,
        )
        .unwrap();

        let config = ProjectConfig::builder(temp.path())
            .alias("~", "lib")
            .build()
            .unwrap();
        let prefixes: Vec<_> = config.aliases.iter().map(|a| a.prefix.as_str()).collect();
        assert_eq!(prefixes, ["@/ui/", "@/", "~"]);
    }

    #[test]
    fn test_workspace_manifest_merged() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "workspaces": ["apps/*"], "devDependencies": { "typescript": "5" } }"#,
        )
        .unwrap();
        let app = temp.path().join("apps/web");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("package.json"), r#"{ "dependencies": { "react": "18" } }"#).unwrap();

        let config = ProjectConfig::load(&app).unwrap();
        assert!(config.workspace_root.is_some());
        assert!(config.dependencies.contains("typescript"));
        assert!(config.dependencies.contains("react"));
    }

    #[test]
    fn test_display_path_and_ignore() {
        let temp = project();
        fs::write(temp.path().join(".depvizignore"), "legacy/\n").unwrap();
        let config = ProjectConfig::load(temp.path()).unwrap();

        let file = config.root.join("src/App.tsx");
        assert_eq!(config.display_path(&file), "src/App.tsx");
        assert!(config.is_ignored(&config.root.join("legacy/Old.tsx")));
        assert!(!config.is_ignored(&file));
    }
}

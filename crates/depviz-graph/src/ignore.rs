//! Project ignore rules.
//!
//! Rules use gitignore syntax and are read once per run from an optional
//! file in the project root (`.depvizignore` by default, with
//! `.compressignore` read when the default file is absent).

use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::ConfigError;

/// Default name of the ignore file in the project root.
pub const DEFAULT_IGNORE_FILE: &str = ".depvizignore";

/// Read instead of [`DEFAULT_IGNORE_FILE`] when only this one exists.
pub const FALLBACK_IGNORE_FILE: &str = ".compressignore";

/// Compiled ignore rules for one project.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// A matcher that ignores nothing.
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
        }
    }

    /// Load `root/<file_name>`; an absent file yields an empty rule set.
    ///
    /// For the default name, `.compressignore` is used when `.depvizignore`
    /// does not exist.
    pub fn load(root: &Path, file_name: &str) -> Result<Self, ConfigError> {
        let Some(path) = ignore_file_path(root, file_name) else {
            return Ok(Self::empty());
        };

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&path) {
            return Err(ConfigError::InvalidIgnore {
                path,
                reason: err.to_string(),
            });
        }
        let gitignore = builder.build().map_err(|err| ConfigError::InvalidIgnore {
            path: path.clone(),
            reason: err.to_string(),
        })?;

        tracing::debug!(
            rules = gitignore.num_ignores(),
            file = %path.display(),
            "Loaded ignore rules"
        );
        Ok(Self { gitignore })
    }

    /// Build a matcher from in-memory patterns.
    pub fn from_patterns<I, S>(root: &Path, patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern.as_ref())
                .map_err(|err| ConfigError::InvalidIgnore {
                    path: root.to_path_buf(),
                    reason: err.to_string(),
                })?;
        }
        let gitignore = builder.build().map_err(|err| ConfigError::InvalidIgnore {
            path: root.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self { gitignore })
    }

    /// Whether a path relative to the project root is excluded.
    ///
    /// A path that is absolute or escapes the root (`../x`) is never ignored.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        if self.gitignore.is_empty() || relative.as_os_str().is_empty() {
            return false;
        }
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }

    pub fn is_empty(&self) -> bool {
        self.gitignore.is_empty()
    }
}

fn ignore_file_path(root: &Path, file_name: &str) -> Option<PathBuf> {
    let path = root.join(file_name);
    if path.is_file() {
        return Some(path);
    }
    if file_name != DEFAULT_IGNORE_FILE {
        return None;
    }
    Some(root.join(FALLBACK_IGNORE_FILE)).filter(|path| path.is_file())
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_ignores_nothing() {
        let temp = TempDir::new().unwrap();
        let matcher = IgnoreMatcher::load(temp.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(matcher.is_empty());
        assert!(!matcher.is_ignored(Path::new("src/App.tsx")));
    }

    #[test]
    fn test_load_rules_from_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_IGNORE_FILE),
            "# generated code\nsrc/generated/\n*.stories.tsx\n!src/keep.stories.tsx\n",
        )
        .unwrap();

        let matcher = IgnoreMatcher::load(temp.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(matcher.is_ignored(Path::new("src/generated/api.ts")));
        assert!(matcher.is_ignored(Path::new("src/Button.stories.tsx")));
        assert!(!matcher.is_ignored(Path::new("src/keep.stories.tsx")));
        assert!(!matcher.is_ignored(Path::new("src/Button.tsx")));
    }

    #[test]
    fn test_compressignore_fallback() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(FALLBACK_IGNORE_FILE), "src/legacy/\n").unwrap();

        let matcher = IgnoreMatcher::load(temp.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(matcher.is_ignored(Path::new("src/legacy/Old.tsx")));

        let custom = IgnoreMatcher::load(temp.path(), ".customignore").unwrap();
        assert!(custom.is_empty());

        fs::write(temp.path().join(DEFAULT_IGNORE_FILE), "*.css\n").unwrap();
        let matcher = IgnoreMatcher::load(temp.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(matcher.is_ignored(Path::new("src/app.css")));
        assert!(!matcher.is_ignored(Path::new("src/legacy/Old.tsx")));
    }

    #[test]
    fn test_paths_outside_root_are_kept() {
        let matcher = IgnoreMatcher::from_patterns(Path::new("/project"), ["*.ts"]).unwrap();
        assert!(matcher.is_ignored(Path::new("a.ts")));
        assert!(!matcher.is_ignored(Path::new("../shared/a.ts")));
        assert!(!matcher.is_ignored(Path::new("/abs/a.ts")));
    }
}

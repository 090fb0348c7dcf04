//! Resolution outcomes and the specifier-shape helpers the resolver uses.

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Result of resolving one import specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A file on disk (absolute, normalized).
    File(PathBuf),

    /// A package from the registry, by package name.
    External(String),

    /// Nothing matched.
    Unresolved,
}

impl ResolvedTarget {
    pub fn is_file(&self) -> bool {
        matches!(self, ResolvedTarget::File(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ResolvedTarget::External(_))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedTarget::Unresolved)
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            ResolvedTarget::File(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTarget::File(path) => write!(f, "File({})", path.display()),
            ResolvedTarget::External(name) => write!(f, "External({name})"),
            ResolvedTarget::Unresolved => f.write_str("Unresolved"),
        }
    }
}

/// A specifier that names a package or baseUrl path, not a relative or
/// absolute file.
pub fn is_bare(specifier: &str) -> bool {
    !(specifier.starts_with('.') || specifier.starts_with('/') || specifier.contains(':'))
}

/// Directory imports inside `from` resolve against.
pub fn containing_dir(from: &Path) -> &Path {
    from.parent().unwrap_or(from)
}

/// Accept `specifier` relative to the importer only if a file exists at
/// exactly that path. Covers assets the module resolver does not handle.
pub fn resolve_exact_file(specifier: &str, from: &Path) -> Option<PathBuf> {
    let candidate = containing_dir(from).join(specifier).clean();
    candidate.is_file().then_some(candidate)
}

//! Path helpers shared by the resolver and the builder.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Make a path absolute (against the process cwd) and lexically normalized.
pub fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .clean()
}

/// Express `path` relative to `base` using forward slashes.
///
/// Paths outside `base` get `..` segments. Paths on another root (a
/// different drive on Windows) are returned as-is.
pub fn relative_slash(path: &Path, base: &Path) -> String {
    let path = path.clean();
    let base = base.clean();

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    if path_parts.first() != base_parts.first() {
        return to_slash(&path);
    }

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    segments.extend(std::iter::repeat_n("..".to_string(), base_parts.len() - common));
    segments.extend(
        path_parts[common..]
            .iter()
            .map(|part| part.as_os_str().to_string_lossy().into_owned()),
    );

    segments.join("/")
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Base name of a file, falling back to the full path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| to_slash(path))
}

/// Lowercased extension without the dot.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// True when any component of the path is `node_modules`.
pub fn is_in_node_modules(path: &Path) -> bool {
    path.components()
        .any(|component| component.as_os_str() == "node_modules")
}

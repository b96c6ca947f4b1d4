use std::path::{Component, Path, PathBuf};

/// Normalizes a repository-relative path, keeping each component's raw
/// bytes.
///
/// `.` components are dropped. Returns `None` when the path cannot name a
/// file inside the repository:
/// - it is empty (or normalizes to nothing)
/// - it is absolute
/// - it contains a `..` component anywhere
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Zip entry name for an already-normalized relative path.
///
/// Components are joined with `/` on every platform. Bytes that are not
/// valid UTF-8 are replaced, so the name can be lossy.
pub fn entry_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Makes a user-supplied path relative to `root`.
///
/// Relative paths are taken as already relative to the root. Absolute paths
/// must live under the root.
pub fn relative_to_root<'a>(root: &Path, path: &'a Path) -> Option<&'a Path> {
    if path.is_absolute() {
        path.strip_prefix(root).ok()
    } else {
        Some(path)
    }
}

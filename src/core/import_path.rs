//! Import path helpers.
//!
//! Import paths are slash-delimited regardless of platform. These helpers
//! convert between them and filesystem paths and implement the `internal`
//! folder conventions used for vendoring.

use std::path::{Component, Path, PathBuf};

/// Name of the folder vendored packages are copied into.
pub const INTERNAL_DIR: &str = "internal";

/// Separator used to split an import path around an `internal` folder.
const INTERNAL_SEGMENT: &str = "/internal/";

/// Check that an import path can be resolved against a root directory.
///
/// Rejects empty paths, absolute paths, backslashes and empty, `.` or `..`
/// segments.
pub fn is_valid(import_path: &str) -> bool {
    !import_path.is_empty()
        && !import_path.contains('\\')
        && import_path
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}

/// Whether `path` is `prefix` itself or a package below it.
pub fn has_path_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// The part of `path` after its first `/internal/` segment.
pub fn internal_suffix(path: &str) -> Option<&str> {
    path.split_once(INTERNAL_SEGMENT)
        .map(|(_, suffix)| suffix)
        .filter(|suffix| !suffix.is_empty())
}

/// The import path a package gets once vendored into `project`.
///
/// Any `internal` nesting in the original path is flattened so only the
/// part after the last `/internal/` is kept:
///
/// - `github.com/user/osext` -> `<project>/internal/github.com/user/osext`
/// - `other.org/x/internal/yaml` -> `<project>/internal/yaml`
pub fn local_import_path(project: &str, import_path: &str) -> String {
    let tail = import_path
        .rsplit(INTERNAL_SEGMENT)
        .next()
        .unwrap_or(import_path);
    format!("{}/{}/{}", project, INTERNAL_DIR, tail)
}

/// Normalize a user-supplied import path argument.
pub fn normalize(arg: &str) -> String {
    arg.trim()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_string()
}

/// Convert an import path to a relative filesystem path.
pub fn to_rel_path(import_path: &str) -> PathBuf {
    import_path.split('/').collect()
}

/// Convert a relative filesystem path to an import path.
///
/// Returns `None` for empty paths or paths with non-normal components.
pub fn from_rel_path(rel: &Path) -> Option<String> {
    let mut segments = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(seg) => segments.push(seg.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

//! Implementation of `quay update` and `quay remove`.
//!
//! Neither workflow has defined semantics yet. Both accept the request and
//! succeed without touching the project; the caller reports the no-op.

use anyhow::Result;

use crate::core::import_path;

/// Update a vendored package. Currently a no-op.
///
/// Returns the normalized import path that was left unchanged.
pub fn update_package(import_path: &str) -> Result<String> {
    let path = import_path::normalize(import_path);
    tracing::debug!("skipping update of {}", path);
    Ok(path)
}

/// Remove a vendored package. Currently a no-op.
///
/// Returns the normalized import path that was left unchanged.
pub fn remove_package(import_path: &str) -> Result<String> {
    let path = import_path::normalize(import_path);
    tracing::debug!("skipping removal of {}", path);
    Ok(path)
}

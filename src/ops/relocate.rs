//! Copying a package's directory tree into the project.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::error::VendorError;
use crate::util::fs;

/// Outcome of a package copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySummary {
    /// Number of files copied
    pub files: usize,

    /// Destination directory
    pub dest: PathBuf,
}

/// Copy the package tree at `src` to `dst`.
///
/// Hidden entries such as `.git` are skipped. The destination must be empty
/// or absent, and must not lie inside `src`.
pub fn copy_package(src: &Path, dst: &Path) -> Result<CopySummary> {
    if !src.is_dir() {
        bail!("package directory `{}` does not exist", src.display());
    }
    let src = fs::normalize_path(src);
    let dst = resolve_dest(dst);
    if dst.starts_with(&src) {
        bail!(
            "cannot copy `{}` into its own subdirectory `{}`",
            src.display(),
            dst.display()
        );
    }
    if fs::has_entries(&dst)? {
        return Err(VendorError::DestinationNotEmpty { path: dst }.into());
    }

    let files = fs::copy_tree(&src, &dst)?;
    tracing::debug!(
        "copied {} files from {} to {}",
        files,
        src.display(),
        dst.display()
    );

    Ok(CopySummary { files, dest: dst })
}

/// Canonicalize the deepest existing ancestor of `dst` and re-append the rest.
fn resolve_dest(dst: &Path) -> PathBuf {
    for ancestor in dst.ancestors() {
        if let (Ok(base), Ok(rest)) = (ancestor.canonicalize(), dst.strip_prefix(ancestor)) {
            return base.join(rest);
        }
    }
    dst.to_path_buf()
}

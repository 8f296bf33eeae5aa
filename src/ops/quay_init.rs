//! Implementation of `quay init`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::error::VendorError;
use crate::core::manifest::VendorManifest;
use crate::util::fs;

/// Create an empty vendor manifest in `dir`.
///
/// Creates the `internal` folder if needed and returns the manifest path.
/// Fails if a manifest already exists; the existing file is left untouched.
pub fn init_project(dir: &Path) -> Result<PathBuf> {
    let manifest_path = VendorManifest::path(dir);
    if manifest_path.exists() {
        return Err(VendorError::ManifestExists {
            dir: dir.to_path_buf(),
        }
        .into());
    }

    fs::ensure_dir(&VendorManifest::internal_dir(dir))?;
    VendorManifest::new().save(dir)?;

    tracing::info!("initialized vendor manifest at {}", manifest_path.display());
    Ok(manifest_path)
}

//! Implementation of `quay add`.
//!
//! Vendoring runs as three stages so the manifest never records a package
//! whose copy or rewrite failed:
//!
//! 1. copy the package tree into the project's `internal` folder
//! 2. rewrite every file importing the original path
//! 3. append the manifest entry and save it
//!
//! If stage 2 fails before any file is written, the fresh copy is removed.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::error::VendorError;
use crate::core::import_path;
use crate::core::manifest::{VendorManifest, VendorPackage};
use crate::core::status::ListStatus;
use crate::core::workspace::Workspace;
use crate::ops::relocate;
use crate::ops::rewrite::{self, PlannedRewrite, Rule};
use crate::util::fs;

/// Result of vendoring a package.
#[derive(Debug, Clone)]
pub struct AddResult {
    /// Original import path
    pub vendor_path: String,

    /// Import path of the vendored copy
    pub local_path: String,

    /// Directory the package was copied to
    pub dest_dir: PathBuf,

    /// Number of files copied
    pub files_copied: usize,

    /// Project files whose imports were rewritten
    pub rewritten: Vec<PathBuf>,
}

/// Vendor the external package `import_path` into the project.
pub fn add_package(ws: &mut Workspace, import_path: &str) -> Result<AddResult> {
    let vendor_path = import_path::normalize(import_path);
    ws.load_packages(&[&vendor_path])?;

    let (status, src_dir) = ws
        .package(&vendor_path)
        .map(|p| (p.status, p.dir.clone()))
        .unwrap_or((ListStatus::Unknown, None));
    match status {
        ListStatus::External => {}
        ListStatus::Internal | ListStatus::Unused => {
            return Err(VendorError::AlreadyVendored(vendor_path).into())
        }
        ListStatus::Local => return Err(VendorError::LocalPackage(vendor_path).into()),
        ListStatus::Unknown | ListStatus::Missing | ListStatus::Std => {
            return Err(VendorError::NotResolvable(vendor_path).into())
        }
    }
    let src_dir = src_dir.ok_or_else(|| VendorError::NotResolvable(vendor_path.clone()))?;

    let local_path = import_path::local_import_path(ws.root_import_path(), &vendor_path);
    let dest_dir = ws
        .workspace_root()
        .join(import_path::to_rel_path(&local_path));

    tracing::info!("vendoring {} as {}", vendor_path, local_path);
    let copy = relocate::copy_package(&src_dir, &dest_dir)?;

    let planned = match plan_rewrite(ws, &vendor_path, &local_path) {
        Ok(planned) => planned,
        Err(err) => {
            let internal = fs::normalize_path(&VendorManifest::internal_dir(ws.root_dir()));
            let cleanup = fs::remove_dir_all_if_exists(&copy.dest)
                .and_then(|()| fs::remove_empty_parents(&copy.dest, &internal));
            if let Err(cleanup) = cleanup {
                tracing::warn!("failed to remove partial copy: {:#}", cleanup);
            }
            return Err(err);
        }
    };
    let rewritten = rewrite::apply_rewrites(&planned)
        .with_context(|| format!("failed to rewrite imports of `{}`", vendor_path))?;

    ws.manifest_mut()
        .push(VendorPackage::new(vendor_path.clone(), local_path.clone()));
    ws.manifest().save(ws.root_dir())?;

    Ok(AddResult {
        vendor_path,
        local_path,
        dest_dir: copy.dest,
        files_copied: copy.files,
        rewritten,
    })
}

/// Reload the graph with the copy in place and plan the import rewrite.
fn plan_rewrite(ws: &mut Workspace, vendor_path: &str, local_path: &str) -> Result<Vec<PlannedRewrite>> {
    ws.load_packages(&[vendor_path])?;
    let files = ws.files_importing(vendor_path);
    tracing::debug!("{} files import {}", files.len(), vendor_path);
    rewrite::plan_rewrites(&files, &[Rule::new(vendor_path, local_path)], ws.parser())
}

//! Import path classification.
//!
//! Given the roots, the vendor manifest and the project's own import path,
//! decide which [`ListStatus`] an import path has. Rules are applied in
//! order and the first match wins:
//!
//! 1. malformed path: `Unknown`
//! 2. not under any workspace root nor the toolchain root: `Missing`
//! 3. under the toolchain root: `Std`
//! 4. vendored (project `internal` subtree, or known to the manifest): `Internal`
//! 5. inside the project tree: `Local`
//! 6. anything else under a workspace root: `External`
//!
//! `Unused` depends on global reference counts and is assigned by the
//! workspace after every path has been classified.

use std::path::PathBuf;

use crate::core::import_path::{self, INTERNAL_DIR};
use crate::core::manifest::VendorManifest;
use crate::core::roots::Roots;
use crate::core::status::ListStatus;

/// Pseudo-package used for cgo; it has no directory.
const CGO_PACKAGE: &str = "C";

/// Outcome of classifying one import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: ListStatus,

    /// Directory the path resolved to, if any.
    pub dir: Option<PathBuf>,
}

impl Resolution {
    fn new(status: ListStatus, dir: Option<PathBuf>) -> Self {
        Resolution { status, dir }
    }
}

/// Classifies import paths relative to one project.
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier<'a> {
    roots: &'a Roots,
    manifest: &'a VendorManifest,
    project: &'a str,
}

impl<'a> StatusClassifier<'a> {
    pub fn new(roots: &'a Roots, manifest: &'a VendorManifest, project: &'a str) -> Self {
        StatusClassifier {
            roots,
            manifest,
            project,
        }
    }

    /// Classify an import path.
    pub fn classify(&self, import_path: &str) -> ListStatus {
        self.resolve(import_path).status
    }

    /// Classify an import path and report the directory it resolved to.
    pub fn resolve(&self, import_path: &str) -> Resolution {
        if import_path == CGO_PACKAGE {
            return Resolution::new(ListStatus::Std, None);
        }
        if !import_path::is_valid(import_path) {
            return Resolution::new(ListStatus::Unknown, None);
        }

        if let Some(dir) = self.roots.std_dir(import_path) {
            return Resolution::new(ListStatus::Std, Some(dir));
        }
        let Some(dir) = self.roots.workspace_dir(import_path) else {
            return Resolution::new(ListStatus::Missing, None);
        };

        let status = if self.is_vendored(import_path) {
            ListStatus::Internal
        } else if import_path::has_path_prefix(import_path, self.project) {
            ListStatus::Local
        } else {
            ListStatus::External
        };
        Resolution::new(status, Some(dir))
    }

    /// Whether a path refers to vendored code.
    ///
    /// True for anything in the project's `internal` subtree, for the
    /// manifest's local and original paths, and for paths whose part after
    /// `/internal/` matches the same part of a recorded local path.
    pub fn is_vendored(&self, import_path: &str) -> bool {
        let internal_root = format!("{}/{}", self.project, INTERNAL_DIR);
        if import_path::has_path_prefix(import_path, &internal_root) {
            return true;
        }
        if self.manifest.by_local_path(import_path).is_some()
            || self.manifest.by_vendor_path(import_path).is_some()
        {
            return true;
        }
        match import_path::internal_suffix(import_path) {
            Some(suffix) => self
                .manifest
                .packages
                .iter()
                .filter_map(|p| import_path::internal_suffix(&p.local_path))
                .any(|local| local == suffix),
            None => false,
        }
    }
}

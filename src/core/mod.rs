//! Core data structures.
//!
//! This module contains the fundamental types used throughout quay:
//! statuses, the vendor manifest, roots, and the workspace package graph.

pub mod classify;
pub mod error;
pub mod import_path;
pub mod manifest;
pub mod package;
pub mod roots;
pub mod scan;
pub mod status;
pub mod workspace;

pub use classify::{Resolution, StatusClassifier};
pub use error::VendorError;
pub use manifest::{VendorManifest, VendorPackage};
pub use package::Package;
pub use roots::Roots;
pub use scan::ScanOptions;
pub use status::{ListItem, ListStatus};
pub use workspace::Workspace;

//! quay - vendor third-party packages into a project's `internal` folder
//!
//! This crate provides the core library functionality for quay: import
//! classification, the vendor manifest, package copying and import
//! rewriting.

pub mod core;
pub mod ops;
pub mod source;
pub mod util;

/// Test utilities for quay unit tests.
///
/// This module is only available when running tests. It provides
/// synthetic workspace and toolchain trees in temporary directories.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::VendorManifest, package::Package, roots::Roots, status::ListStatus,
    workspace::Workspace,
};

pub use util::context::GlobalContext;

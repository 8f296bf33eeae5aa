//! High-level operations.
//!
//! This module contains the implementation of quay commands and the
//! rewrite and relocation primitives they are built from.

pub mod quay_add;
pub mod quay_init;
pub mod quay_list;
pub mod quay_update;
pub mod relocate;
pub mod rewrite;

pub use quay_add::{add_package, AddResult};
pub use quay_init::init_project;
pub use quay_list::list_packages;
pub use quay_update::{remove_package, update_package};
pub use relocate::{copy_package, CopySummary};
pub use rewrite::{rewrite_files, rewrite_source, RewriteSummary, Rule};

//! Test utilities for quay unit tests.
//!
//! Tests run against synthetic workspace and toolchain trees created in a
//! temporary directory, so nothing depends on the real environment.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::WorkspaceFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fx = WorkspaceFixture::new();
//!     fx.std_package("fmt");
//!     fx.gopath_package("example.com/foo", &[]);
//!     let project = fx.init_project("example.com/app");
//!     fx.write_go(&project, "main.go", "main", &["fmt", "example.com/foo"]);
//!
//!     let roots = fx.roots();
//!     // Use roots and project in tests...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;

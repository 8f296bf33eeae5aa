//! User-facing error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by vendoring workflows.
///
/// Operations return `anyhow::Result`; callers that need to react to a
/// specific failure recover it with `downcast_ref::<VendorError>()`.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("`internal/vendor.json` already exists in `{}`", dir.display())]
    ManifestExists { dir: PathBuf },

    #[error("unable to find an `internal` folder with a vendor file in `{}` or any parent", dir.display())]
    MissingManifest { dir: PathBuf },

    #[error("no workspace roots configured (set QUAY_PATH or GOPATH)")]
    MissingWorkspace,

    #[error("workspace root `{}` is not a directory", path.display())]
    WorkspaceRootNotFound { path: PathBuf },

    #[error("unable to determine the toolchain root (set QUAY_ROOT or GOROOT)")]
    MissingToolchain,

    #[error("toolchain root `{}` is not a directory", path.display())]
    ToolchainRootNotFound { path: PathBuf },

    #[error("project `{}` is not inside any workspace root", dir.display())]
    OutsideWorkspace { dir: PathBuf },

    #[error("package `{0}` already exists as a vendor package")]
    AlreadyVendored(String),

    #[error("cannot vendor local package `{0}`")]
    LocalPackage(String),

    #[error("package `{0}` cannot be resolved in any workspace root")]
    NotResolvable(String),

    #[error("destination `{}` already contains files", path.display())]
    DestinationNotEmpty { path: PathBuf },
}

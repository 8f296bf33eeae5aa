//! Workspace and toolchain roots.
//!
//! Roots are an explicit configuration object handed to the workspace and
//! the classifier, so tests can supply synthetic trees without touching the
//! process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::error::VendorError;
use crate::core::import_path;
use crate::util::config::WorkspaceConfig;
use crate::util::fs::normalize_path;

/// Directories import paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Ordered workspace roots; the first match wins.
    workspace: Vec<PathBuf>,

    /// Root containing standard library packages.
    toolchain: PathBuf,
}

impl Roots {
    /// Create roots, checking that every directory exists.
    pub fn new(workspace: Vec<PathBuf>, toolchain: PathBuf) -> Result<Self> {
        if workspace.is_empty() {
            return Err(VendorError::MissingWorkspace.into());
        }
        for root in &workspace {
            if !root.is_dir() {
                return Err(VendorError::WorkspaceRootNotFound { path: root.clone() }.into());
            }
        }
        if !toolchain.is_dir() {
            return Err(VendorError::ToolchainRootNotFound { path: toolchain }.into());
        }

        Ok(Roots {
            workspace: workspace.iter().map(|p| normalize_path(p)).collect(),
            toolchain: normalize_path(&toolchain),
        })
    }

    /// Resolve roots from configuration and environment.
    ///
    /// Precedence: `QUAY_PATH`/`QUAY_ROOT`, then the `[workspace]` config
    /// table, then `GOPATH`/`GOROOT` (with `src` appended), then the `go`
    /// binary on `PATH` for the toolchain.
    pub fn resolve<F>(config: &WorkspaceConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let workspace = if let Some(paths) = env("QUAY_PATH").filter(|v| !v.is_empty()) {
            std::env::split_paths(&paths).collect()
        } else if !config.roots.is_empty() {
            config.roots.clone()
        } else if let Some(paths) = env("GOPATH").filter(|v| !v.is_empty()) {
            std::env::split_paths(&paths).map(|p| p.join("src")).collect()
        } else {
            Vec::new()
        };

        let toolchain = env("QUAY_ROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| config.toolchain_root.clone())
            .or_else(|| {
                env("GOROOT")
                    .filter(|v| !v.is_empty())
                    .map(|p| PathBuf::from(p).join("src"))
            })
            .or_else(toolchain_from_path)
            .ok_or(VendorError::MissingToolchain)?;

        tracing::debug!(
            "workspace roots: {:?}, toolchain root: {}",
            workspace,
            toolchain.display()
        );

        Self::new(workspace, toolchain)
    }

    /// Workspace roots in resolution order.
    pub fn workspace(&self) -> &[PathBuf] {
        &self.workspace
    }

    /// The toolchain root.
    pub fn toolchain(&self) -> &Path {
        &self.toolchain
    }

    /// Directory of a standard library package, if it exists.
    pub fn std_dir(&self, import_path: &str) -> Option<PathBuf> {
        let dir = self.toolchain.join(import_path::to_rel_path(import_path));
        dir.is_dir().then_some(dir)
    }

    /// Directory of a package under the first workspace root holding it.
    pub fn workspace_dir(&self, import_path: &str) -> Option<PathBuf> {
        let rel = import_path::to_rel_path(import_path);
        self.workspace
            .iter()
            .map(|root| root.join(&rel))
            .find(|dir| dir.is_dir())
    }

    /// Find the workspace root containing `dir` and the import path of `dir`
    /// relative to it.
    pub fn locate(&self, dir: &Path) -> Option<(&Path, String)> {
        let dir = normalize_path(dir);
        self.workspace.iter().find_map(|root| {
            let rel = dir.strip_prefix(root).ok()?;
            let import_path = import_path::from_rel_path(rel)?;
            Some((root.as_path(), import_path))
        })
    }
}

/// Derive the toolchain source root from the `go` binary on `PATH`.
fn toolchain_from_path() -> Option<PathBuf> {
    let bin = which::which("go").ok()?;
    let bin = bin.canonicalize().unwrap_or(bin);
    // <root>/bin/go
    let root = bin.parent()?.parent()?;
    Some(root.join("src"))
}

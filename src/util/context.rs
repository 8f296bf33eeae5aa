//! Global context for quay operations.
//!
//! Provides centralized access to the working directory, configuration
//! files and the environment, and assembles a [`Workspace`] from them.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::VendorManifest;
use crate::core::roots::Roots;
use crate::core::workspace::Workspace;
use crate::source::GoImportParser;
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global config file, if the platform has a config directory
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext {
            cwd,
            global_config: config::global_config_path(),
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a specific global config file (or none).
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Load configuration for a project, merged over the global config.
    pub fn config(&self, project_root: &Path) -> Config {
        config::load_config(
            self.global_config_path(),
            &config::project_config_path(project_root),
        )
    }

    /// Resolve roots from the process environment and `config`.
    pub fn roots(&self, config: &Config) -> Result<Roots> {
        Roots::resolve(&config.workspace, |key| std::env::var_os(key))
    }

    /// Resolve roots using a custom environment lookup.
    pub fn roots_with_env<F>(&self, config: &Config, env: F) -> Result<Roots>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Roots::resolve(&config.workspace, env)
    }

    /// Find the project containing the working directory and open it.
    pub fn open_workspace(&self) -> Result<Workspace> {
        let project_root = VendorManifest::find_project_root(&self.cwd)?;
        let config = self.config(&project_root);
        let roots = self.roots(&config)?;
        let scan = config.scan.options()?;

        Workspace::open(&project_root, roots, scan, Box::new(GoImportParser))
    }
}

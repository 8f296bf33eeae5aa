//! Configuration file support for quay.
//!
//! quay reads two configuration files:
//! - Global: `<config dir>/quay/config.toml` - User-wide defaults
//! - Project: `.quay/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Environment
//! variables (`QUAY_PATH`, `QUAY_ROOT`) take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::scan::ScanOptions;

/// Directory holding project configuration.
pub const PROJECT_CONFIG_DIR: &str = ".quay";

/// File name of both configuration files.
pub const CONFIG_FILE: &str = "config.toml";

/// quay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace and toolchain roots
    pub workspace: WorkspaceConfig,

    /// Source scanning settings
    pub scan: ScanConfig,
}

/// Root directory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace roots, searched in order
    pub roots: Vec<PathBuf>,

    /// Root holding standard library packages
    pub toolchain_root: Option<PathBuf>,
}

/// Source scanning configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extensions (default: `["go"]`)
    pub extensions: Option<Vec<String>>,

    /// Directory name glob patterns to skip (default: `["testdata"]`)
    pub skip_dirs: Option<Vec<String>>,

    /// Parser worker threads (None = auto-detect)
    pub jobs: Option<usize>,
}

impl ScanConfig {
    /// Build scan options, filling unset fields with defaults.
    pub fn options(&self) -> Result<ScanOptions> {
        let defaults = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let extensions = self
            .extensions
            .clone()
            .unwrap_or_else(|| defaults(ScanOptions::DEFAULT_EXTENSIONS));
        let skip_dirs = self
            .skip_dirs
            .clone()
            .unwrap_or_else(|| defaults(ScanOptions::DEFAULT_SKIP_DIRS));

        if self.jobs == Some(0) {
            anyhow::bail!("`scan.jobs` must be at least 1");
        }
        ScanOptions::new(&extensions, &skip_dirs, self.jobs)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.workspace.roots.is_empty() {
            self.workspace.roots = other.workspace.roots;
        }
        if other.workspace.toolchain_root.is_some() {
            self.workspace.toolchain_root = other.workspace.toolchain_root;
        }

        if other.scan.extensions.is_some() {
            self.scan.extensions = other.scan.extensions;
        }
        if other.scan.skip_dirs.is_some() {
            self.scan.skip_dirs = other.scan.skip_dirs;
        }
        if other.scan.jobs.is_some() {
            self.scan.jobs = other.scan.jobs;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.quay/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config path.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "quay").map(|d| d.config_dir().join(CONFIG_FILE))
}

/// Get the project config path (.quay/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE)
}

//! Vendor manifest (`internal/vendor.json`).
//!
//! The manifest is the durable record of which packages were vendored and
//! where they were copied to. It is written atomically under an exclusive
//! file lock so a crash or a concurrent writer never leaves a partial file.
//!
//! ```json
//! {
//! 	"tool": "quay",
//! 	"package": [
//! 		{
//! 			"vendor": "github.com/user/osext",
//! 			"local": "example.com/app/internal/github.com/user/osext"
//! 		}
//! 	]
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::VendorError;
use crate::core::import_path::INTERNAL_DIR;
use crate::util::fs::{self, FileLock};

/// File name of the manifest inside the `internal` folder.
pub const MANIFEST_FILE: &str = "vendor.json";

/// Lock file guarding manifest writes. Only present while a save runs.
const LOCK_FILE: &str = ".vendor.json.lock";

/// Identity recorded in the `tool` field.
pub const TOOL_NAME: &str = "quay";

/// A vendored package record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPackage {
    /// Import path the package had when it was vendored.
    #[serde(rename = "vendor")]
    pub vendor_path: String,

    /// Import path of the vendored copy.
    #[serde(rename = "local")]
    pub local_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(
        rename = "versionTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version_time: Option<String>,
}

impl VendorPackage {
    pub fn new(vendor_path: impl Into<String>, local_path: impl Into<String>) -> Self {
        VendorPackage {
            vendor_path: vendor_path.into(),
            local_path: local_path.into(),
            version: None,
            version_time: None,
        }
    }
}

/// The vendor manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorManifest {
    pub tool: String,

    #[serde(rename = "package", default)]
    pub packages: Vec<VendorPackage>,
}

impl VendorManifest {
    /// Create an empty manifest stamped with this tool's identity.
    pub fn new() -> Self {
        VendorManifest {
            tool: TOOL_NAME.to_string(),
            packages: Vec::new(),
        }
    }

    /// Path of the `internal` folder of a project.
    pub fn internal_dir(project_root: &Path) -> PathBuf {
        project_root.join(INTERNAL_DIR)
    }

    /// Path of the manifest file of a project.
    pub fn path(project_root: &Path) -> PathBuf {
        Self::internal_dir(project_root).join(MANIFEST_FILE)
    }

    /// Whether a project has a manifest.
    pub fn exists(project_root: &Path) -> bool {
        Self::path(project_root).is_file()
    }

    /// Find the nearest directory at or above `start` holding a manifest.
    pub fn find_project_root(start: &Path) -> Result<PathBuf> {
        let mut current = fs::normalize_path(start);
        loop {
            if Self::exists(&current) {
                return Ok(current);
            }
            if !current.pop() {
                return Err(VendorError::MissingManifest {
                    dir: start.to_path_buf(),
                }
                .into());
            }
        }
    }

    /// Load the manifest of a project.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.is_file() {
            return Err(VendorError::MissingManifest {
                dir: project_root.to_path_buf(),
            }
            .into());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_json(&content)
            .with_context(|| format!("failed to parse vendor manifest: {}", path.display()))
    }

    /// Save the manifest of a project, replacing any existing file atomically.
    pub fn save(&self, project_root: &Path) -> Result<()> {
        let internal = Self::internal_dir(project_root);
        fs::ensure_dir(&internal)?;

        let content = self.to_json()?;
        let _lock = FileLock::exclusive(&internal.join(LOCK_FILE))?;
        fs::write_atomic(&Self::path(project_root), content.as_bytes())?;

        tracing::debug!(
            "saved vendor manifest with {} packages to {}",
            self.packages.len(),
            internal.display()
        );
        Ok(())
    }

    /// Parse a manifest from JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize to the canonical tab-indented JSON form.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .context("failed to serialize vendor manifest")?;
        buf.push(b'\n');
        Ok(String::from_utf8(buf)?)
    }

    /// Find the entry vendored from `vendor_path`.
    pub fn by_vendor_path(&self, vendor_path: &str) -> Option<&VendorPackage> {
        self.packages.iter().find(|p| p.vendor_path == vendor_path)
    }

    /// Find the entry whose vendored copy lives at `local_path`.
    pub fn by_local_path(&self, local_path: &str) -> Option<&VendorPackage> {
        self.packages.iter().find(|p| p.local_path == local_path)
    }

    /// Record a newly vendored package.
    pub fn push(&mut self, package: VendorPackage) {
        self.packages.push(package);
    }
}

impl Default for VendorManifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest() {
        let tmp = TempDir::new().unwrap();
        let err = VendorManifest::load(tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VendorError>(),
            Some(VendorError::MissingManifest { .. })
        ));
    }

    #[test]
    fn test_empty_manifest_format() {
        let json = VendorManifest::new().to_json().unwrap();
        assert_eq!(json, "{\n\t\"tool\": \"quay\",\n\t\"package\": []\n}\n");
    }

    #[test]
    fn test_save_load_roundtrip_is_byte_identical() {
        let tmp = TempDir::new().unwrap();

        let mut manifest = VendorManifest::new();
        manifest.push(VendorPackage::new(
            "github.com/user/osext",
            "example.com/app/internal/github.com/user/osext",
        ));
        manifest.push(VendorPackage {
            vendor_path: "other.org/x/internal/yaml".to_string(),
            local_path: "example.com/app/internal/yaml".to_string(),
            version: Some("v1.2.0".to_string()),
            version_time: Some("2015-06-01T10:00:00Z".to_string()),
        });
        manifest.save(tmp.path()).unwrap();

        let first = std::fs::read(VendorManifest::path(tmp.path())).unwrap();
        let loaded = VendorManifest::load(tmp.path()).unwrap();
        assert_eq!(loaded, manifest);

        loaded.save(tmp.path()).unwrap();
        let second = std::fs::read(VendorManifest::path(tmp.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut manifest = VendorManifest::new();
        manifest.push(VendorPackage::new("a.com/b", "example.com/app/internal/a.com/b"));
        let json = manifest.to_json().unwrap();
        assert!(!json.contains("version"));
        assert!(json.contains("\"vendor\": \"a.com/b\""));
        assert!(json.contains("\"local\": \"example.com/app/internal/a.com/b\""));
    }

    #[test]
    fn test_missing_package_key_loads_empty() {
        let manifest = VendorManifest::from_json(r#"{"tool": "other"}"#).unwrap();
        assert_eq!(manifest.tool, "other");
        assert!(manifest.packages.is_empty());
    }

    #[test]
    fn test_lookups() {
        let mut manifest = VendorManifest::new();
        manifest.push(VendorPackage::new("a.com/b", "example.com/app/internal/a.com/b"));

        assert!(manifest.by_vendor_path("a.com/b").is_some());
        assert!(manifest.by_local_path("example.com/app/internal/a.com/b").is_some());
        assert!(manifest.by_vendor_path("example.com/app/internal/a.com/b").is_none());
    }

    #[test]
    fn test_find_project_root_searches_upward() {
        let tmp = TempDir::new().unwrap();
        VendorManifest::new().save(tmp.path()).unwrap();
        let nested = tmp.path().join("cmd/tool");
        std::fs::create_dir_all(&nested).unwrap();

        let root = VendorManifest::find_project_root(&nested).unwrap();
        assert_eq!(root, fs::normalize_path(tmp.path()));
    }
}

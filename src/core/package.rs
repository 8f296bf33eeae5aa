//! Packages discovered while loading a workspace.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::core::status::{ListItem, ListStatus};

/// A package reachable from the project root.
///
/// Packages are rebuilt on every load and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Import path identifying the package.
    pub import_path: String,

    /// Directory the import path resolved to, if it resolved.
    pub dir: Option<PathBuf>,

    pub status: ListStatus,

    /// Scanned source files belonging to this package.
    pub files: BTreeSet<PathBuf>,

    /// Import paths referenced by each scanned file, in source order.
    pub imports: BTreeMap<PathBuf, Vec<String>>,
}

impl Package {
    /// Create a package with no files and `Unknown` status.
    pub fn new(import_path: impl Into<String>) -> Self {
        Package {
            import_path: import_path.into(),
            dir: None,
            status: ListStatus::Unknown,
            files: BTreeSet::new(),
            imports: BTreeMap::new(),
        }
    }

    /// Record a scanned file and the paths it imports.
    pub fn add_file(&mut self, file: PathBuf, imports: Vec<String>) {
        self.files.insert(file.clone());
        self.imports.insert(file, imports);
    }

    /// Project into a list row.
    pub fn list_item(&self) -> ListItem {
        ListItem::new(self.status, self.import_path.clone())
    }
}

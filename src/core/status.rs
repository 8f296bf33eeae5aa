//! Package status classification results.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The category an import path falls into.
///
/// Variants are mutually exclusive. Display ordering is defined by
/// [`ListStatus::severity`], not by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    /// Resolution could not be attempted (malformed path).
    Unknown,
    /// Not found under any workspace root or the toolchain root.
    Missing,
    /// Standard library package from the toolchain root.
    Std,
    /// Part of the current project's own tree.
    Local,
    /// Third-party package living under a workspace root.
    External,
    /// Vendored into the project's `internal` folder.
    Internal,
    /// Recorded in the vendor manifest but no longer referenced.
    Unused,
}

impl ListStatus {
    /// Every status, lowest severity first.
    pub const ALL: [ListStatus; 7] = [
        ListStatus::Unknown,
        ListStatus::Missing,
        ListStatus::Std,
        ListStatus::Local,
        ListStatus::External,
        ListStatus::Internal,
        ListStatus::Unused,
    ];

    /// Presentation severity. Higher values are listed first.
    pub fn severity(self) -> u8 {
        match self {
            ListStatus::Unknown => 0,
            ListStatus::Missing => 1,
            ListStatus::Std => 2,
            ListStatus::Local => 3,
            ListStatus::External => 4,
            ListStatus::Internal => 5,
            ListStatus::Unused => 6,
        }
    }

    /// Single-letter code used in list output.
    pub fn code(self) -> &'static str {
        match self {
            ListStatus::Unknown => "?",
            ListStatus::Missing => "m",
            ListStatus::Std => "s",
            ListStatus::Local => "l",
            ListStatus::External => "e",
            ListStatus::Internal => "i",
            ListStatus::Unused => "u",
        }
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of `quay list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub status: ListStatus,
    pub path: String,
}

impl ListItem {
    pub fn new(status: ListStatus, path: impl Into<String>) -> Self {
        ListItem {
            status,
            path: path.into(),
        }
    }

    /// Severity descending, then path ascending.
    pub fn list_order(&self, other: &Self) -> Ordering {
        other
            .status
            .severity()
            .cmp(&self.status.severity())
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.path)
    }
}

/// Sort items so anomalies (unused, internal, external) come before
/// mundane local and standard library entries.
pub fn sort_items(items: &mut [ListItem]) {
    items.sort_by(ListItem::list_order);
}

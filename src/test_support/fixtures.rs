//! Workspace fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::import_path;
use crate::core::manifest::VendorManifest;
use crate::core::roots::Roots;
use crate::core::scan::ScanOptions;
use crate::core::workspace::Workspace;
use crate::source::GoImportParser;

/// A temporary GOPATH-style workspace root plus a toolchain root.
///
/// Layout:
///
/// ```text
/// <tmp>/gopath/src/<import path>/...
/// <tmp>/goroot/src/<std package>/...
/// ```
pub struct WorkspaceFixture {
    tmp: TempDir,
}

impl WorkspaceFixture {
    /// Create empty workspace and toolchain roots.
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("gopath/src")).unwrap();
        fs::create_dir_all(tmp.path().join("goroot/src")).unwrap();
        WorkspaceFixture { tmp }
    }

    /// The temporary directory holding both roots.
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// Workspace root (`gopath/src`).
    pub fn gopath_src(&self) -> PathBuf {
        self.tmp.path().join("gopath/src")
    }

    /// Toolchain root (`goroot/src`).
    pub fn goroot_src(&self) -> PathBuf {
        self.tmp.path().join("goroot/src")
    }

    /// Roots pointing at this fixture.
    pub fn roots(&self) -> Roots {
        Roots::new(vec![self.gopath_src()], self.goroot_src()).unwrap()
    }

    /// Directory of a package in the workspace root.
    pub fn package_dir(&self, path: &str) -> PathBuf {
        self.gopath_src().join(import_path::to_rel_path(path))
    }

    /// Create a standard library package.
    pub fn std_package(&self, path: &str) -> PathBuf {
        let dir = self.goroot_src().join(import_path::to_rel_path(path));
        fs::create_dir_all(&dir).unwrap();
        let name = package_name(path);
        fs::write(dir.join(format!("{}.go", name)), go_source(&name, &[])).unwrap();
        dir
    }

    /// Create a package in the workspace root with one source file.
    pub fn gopath_package(&self, path: &str, imports: &[&str]) -> PathBuf {
        let dir = self.package_dir(path);
        let name = package_name(path);
        self.write_go(&dir, &format!("{}.go", name), &name, imports);
        dir
    }

    /// Create a project directory with an empty vendor manifest.
    pub fn init_project(&self, path: &str) -> PathBuf {
        let dir = self.package_dir(path);
        fs::create_dir_all(&dir).unwrap();
        VendorManifest::new().save(&dir).unwrap();
        dir
    }

    /// Write a Go file importing `imports` into `dir`.
    pub fn write_go(&self, dir: &Path, file: &str, package: &str, imports: &[&str]) -> PathBuf {
        let path = dir.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, go_source(package, imports)).unwrap();
        path
    }

    /// Open a workspace for a project with default scan options.
    pub fn workspace(&self, project_dir: &Path) -> Workspace {
        Workspace::open(
            project_dir,
            self.roots(),
            ScanOptions::default(),
            Box::new(GoImportParser),
        )
        .unwrap()
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Go source for a file declaring `package` and importing `imports`.
pub fn go_source(package: &str, imports: &[&str]) -> String {
    let mut src = format!("package {}\n", package);
    if !imports.is_empty() {
        src.push_str("\nimport (\n");
        for import in imports {
            src.push_str(&format!("\t\"{}\"\n", import));
        }
        src.push_str(")\n");
    }
    src.push_str("\nfunc init() {}\n");
    src
}

/// A package name derived from the last segment of an import path.
pub fn package_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    let name: String = last
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("p{}", name)
    } else {
        name
    }
}

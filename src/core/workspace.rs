//! Workspace - the package graph of one project.
//!
//! A Workspace owns everything needed to answer "what does this project
//! import, and what is each import": the project root, its import path,
//! the vendor manifest, and the package graph built by
//! [`Workspace::load_packages`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::classify::StatusClassifier;
use crate::core::error::VendorError;
use crate::core::import_path;
use crate::core::manifest::VendorManifest;
use crate::core::package::Package;
use crate::core::roots::Roots;
use crate::core::scan::{self, ScanOptions};
use crate::core::status::ListStatus;
use crate::source::ImportParser;
use crate::util::fs::normalize_path;

/// A vendoring project and its package graph.
pub struct Workspace {
    /// Project root (the directory holding `internal/vendor.json`)
    root_dir: PathBuf,

    /// Workspace root the project lives under
    workspace_root: PathBuf,

    /// Import path of the project root
    root_import_path: String,

    roots: Roots,
    scan: ScanOptions,
    parser: Box<dyn ImportParser>,
    manifest: VendorManifest,

    /// Every known package by import path
    packages: BTreeMap<String, Package>,

    /// Import path -> files importing it
    file_imports: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("root_dir", &self.root_dir)
            .field("root_import_path", &self.root_import_path)
            .field("packages", &self.packages.len())
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Open the project whose root is `project_dir`.
    pub fn open(
        project_dir: &Path,
        roots: Roots,
        scan: ScanOptions,
        parser: Box<dyn ImportParser>,
    ) -> Result<Self> {
        let root_dir = normalize_path(project_dir);
        let manifest = VendorManifest::load(&root_dir)?;

        let (workspace_root, root_import_path) = roots
            .locate(&root_dir)
            .map(|(root, path)| (root.to_path_buf(), path))
            .ok_or_else(|| VendorError::OutsideWorkspace {
                dir: root_dir.clone(),
            })?;

        tracing::debug!(
            "opened project {} at {}",
            root_import_path,
            root_dir.display()
        );

        Ok(Workspace {
            root_dir,
            workspace_root,
            root_import_path,
            roots,
            scan,
            parser,
            manifest,
            packages: BTreeMap::new(),
            file_imports: BTreeMap::new(),
        })
    }

    /// Open the project containing `cwd`, searching upward for its manifest.
    pub fn discover(
        cwd: &Path,
        roots: Roots,
        scan: ScanOptions,
        parser: Box<dyn ImportParser>,
    ) -> Result<Self> {
        let root = VendorManifest::find_project_root(cwd)?;
        Self::open(&root, roots, scan, parser)
    }

    /// Rebuild the package graph.
    ///
    /// Every scanned package, every imported path and every `focus` path
    /// gets a [`Package`] with its status. Manifest entries whose original
    /// and local paths are both unreferenced are reported as `Unused`.
    pub fn load_packages(&mut self, focus: &[&str]) -> Result<()> {
        let files = scan::source_files(&self.root_dir, &self.scan)?;
        tracing::debug!("scanning {} source files", files.len());
        let parsed = self.parse_all(&files)?;

        let mut packages: BTreeMap<String, Package> = BTreeMap::new();
        let mut file_imports: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();

        for (file, imports) in parsed {
            let pkg_path = self.package_path_of(&file)?;
            for import in &imports {
                file_imports
                    .entry(import.clone())
                    .or_default()
                    .insert(file.clone());
            }
            packages
                .entry(pkg_path.clone())
                .or_insert_with(|| Package::new(pkg_path))
                .add_file(file, imports);
        }

        let mut paths: BTreeSet<String> = packages.keys().cloned().collect();
        paths.extend(file_imports.keys().cloned());
        paths.extend(focus.iter().map(|p| p.to_string()));

        let classifier =
            StatusClassifier::new(&self.roots, &self.manifest, &self.root_import_path);
        for path in paths {
            let resolution = classifier.resolve(&path);
            let pkg = packages
                .entry(path.clone())
                .or_insert_with(|| Package::new(path));
            pkg.status = resolution.status;
            pkg.dir = resolution.dir;
        }

        for entry in &self.manifest.packages {
            let referenced = file_imports.contains_key(&entry.vendor_path)
                || file_imports.contains_key(&entry.local_path);
            if referenced {
                continue;
            }
            let pkg = packages
                .entry(entry.vendor_path.clone())
                .or_insert_with(|| {
                    let mut pkg = Package::new(entry.vendor_path.clone());
                    pkg.dir = classifier.resolve(&entry.vendor_path).dir;
                    pkg
                });
            pkg.status = ListStatus::Unused;
        }

        tracing::debug!(
            "loaded {} packages ({} distinct imports)",
            packages.len(),
            file_imports.len()
        );
        self.packages = packages;
        self.file_imports = file_imports;
        Ok(())
    }

    /// Parse every file on the scan worker pool.
    ///
    /// Results keep the order of `files`; the first failing file in that
    /// order is reported.
    fn parse_all(&self, files: &[PathBuf]) -> Result<Vec<(PathBuf, Vec<String>)>> {
        let parser = self.parser.as_ref();
        let results: Vec<Result<(PathBuf, Vec<String>)>> = self.scan.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let (_, decls) = parser.parse_file(file)?;
                    let imports = decls.into_iter().map(|d| d.path).collect();
                    Ok((file.clone(), imports))
                })
                .collect()
        })?;

        results.into_iter().collect()
    }

    /// Import path of the package a scanned file belongs to.
    fn package_path_of(&self, file: &Path) -> Result<String> {
        let dir = file
            .parent()
            .with_context(|| format!("source file has no parent: {}", file.display()))?;
        dir.strip_prefix(&self.workspace_root)
            .ok()
            .and_then(import_path::from_rel_path)
            .with_context(|| format!("source file outside workspace root: {}", file.display()))
    }

    /// Look up a package by import path.
    pub fn package(&self, import_path: &str) -> Option<&Package> {
        self.packages.get(import_path)
    }

    /// All packages, sorted by import path.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Files importing `import_path`, sorted.
    pub fn files_importing(&self, import_path: &str) -> Vec<PathBuf> {
        self.file_imports
            .get(import_path)
            .map(|files| files.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Status of a package, `Unknown` if it was never loaded.
    pub fn status(&self, import_path: &str) -> ListStatus {
        self.package(import_path)
            .map_or(ListStatus::Unknown, |p| p.status)
    }

    pub fn manifest(&self) -> &VendorManifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut VendorManifest {
        &mut self.manifest
    }

    /// Project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Import path of the project root.
    pub fn root_import_path(&self) -> &str {
        &self.root_import_path
    }

    /// Workspace root containing the project.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    pub fn parser(&self) -> &dyn ImportParser {
        self.parser.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::VendorPackage;
    use crate::test_support::WorkspaceFixture;

    fn statuses(ws: &Workspace) -> Vec<(String, ListStatus)> {
        ws.packages()
            .map(|p| (p.import_path.clone(), p.status))
            .collect()
    }

    #[test]
    fn test_open_outside_workspace() {
        let fx = WorkspaceFixture::new();
        let outside = fx.path().join("elsewhere");
        std::fs::create_dir_all(&outside).unwrap();
        VendorManifest::new().save(&outside).unwrap();

        let err = Workspace::open(
            &outside,
            fx.roots(),
            ScanOptions::default(),
            Box::new(crate::source::GoImportParser),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VendorError>(),
            Some(VendorError::OutsideWorkspace { .. })
        ));
    }

    #[test]
    fn test_open_without_manifest() {
        let fx = WorkspaceFixture::new();
        let dir = fx.gopath_package("example.com/app", &[]);

        let err = Workspace::open(
            &dir,
            fx.roots(),
            ScanOptions::default(),
            Box::new(crate::source::GoImportParser),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VendorError>(),
            Some(VendorError::MissingManifest { .. })
        ));
    }

    #[test]
    fn test_load_builds_graph() {
        let fx = WorkspaceFixture::new();
        fx.std_package("fmt");
        fx.gopath_package("github.com/user/log", &[]);
        let project = fx.init_project("example.com/app");
        let main = fx.write_go(
            &project,
            "main.go",
            "main",
            &["fmt", "github.com/user/log", "example.com/app/util"],
        );
        let util = fx.write_go(&project.join("util"), "util.go", "util", &["fmt", "nowhere.io/x"]);

        let mut ws = fx.workspace(&project);
        assert_eq!(ws.root_import_path(), "example.com/app");
        ws.load_packages(&[]).unwrap();

        assert_eq!(
            statuses(&ws),
            vec![
                ("example.com/app".to_string(), ListStatus::Local),
                ("example.com/app/util".to_string(), ListStatus::Local),
                ("fmt".to_string(), ListStatus::Std),
                ("github.com/user/log".to_string(), ListStatus::External),
                ("nowhere.io/x".to_string(), ListStatus::Missing),
            ]
        );

        let main = normalize_path(&main);
        let util = normalize_path(&util);
        assert_eq!(ws.files_importing("fmt"), vec![main.clone(), util.clone()]);
        assert_eq!(ws.files_importing("github.com/user/log"), vec![main.clone()]);
        assert!(ws.files_importing("example.com/app").is_empty());

        let app = ws.package("example.com/app").unwrap();
        assert!(app.files.contains(&main));
        assert_eq!(
            app.imports[&main],
            vec!["fmt", "github.com/user/log", "example.com/app/util"]
        );
        assert!(ws.package("github.com/user/log").unwrap().dir.is_some());
        assert!(ws.package("nowhere.io/x").unwrap().dir.is_none());
    }

    #[test]
    fn test_focus_paths_are_classified() {
        let fx = WorkspaceFixture::new();
        fx.gopath_package("github.com/user/log", &[]);
        let project = fx.init_project("example.com/app");
        fx.write_go(&project, "main.go", "main", &[]);

        let mut ws = fx.workspace(&project);
        ws.load_packages(&["github.com/user/log"]).unwrap();

        assert_eq!(ws.status("github.com/user/log"), ListStatus::External);
        assert!(ws.files_importing("github.com/user/log").is_empty());
        assert_eq!(ws.status("never.loaded/pkg"), ListStatus::Unknown);
    }

    #[test]
    fn test_unused_manifest_entry() {
        let fx = WorkspaceFixture::new();
        fx.gopath_package("github.com/user/gone", &[]);
        let project = fx.init_project("example.com/app");
        fx.write_go(&project, "main.go", "main", &[]);

        let mut manifest = VendorManifest::load(&project).unwrap();
        manifest.push(VendorPackage::new(
            "github.com/user/gone",
            "example.com/app/internal/github.com/user/gone",
        ));
        manifest.save(&project).unwrap();

        let mut ws = fx.workspace(&project);
        ws.load_packages(&[]).unwrap();

        assert_eq!(ws.status("github.com/user/gone"), ListStatus::Unused);
        assert!(ws.package("github.com/user/gone").unwrap().dir.is_some());
    }

    #[test]
    fn test_referenced_vendored_package_is_internal() {
        let fx = WorkspaceFixture::new();
        fx.gopath_package("github.com/user/osext", &[]);
        let project = fx.init_project("example.com/app");
        fx.gopath_package("example.com/app/internal/github.com/user/osext", &[]);
        fx.write_go(
            &project,
            "main.go",
            "main",
            &["example.com/app/internal/github.com/user/osext"],
        );

        let mut manifest = VendorManifest::load(&project).unwrap();
        manifest.push(VendorPackage::new(
            "github.com/user/osext",
            "example.com/app/internal/github.com/user/osext",
        ));
        manifest.save(&project).unwrap();

        let mut ws = fx.workspace(&project);
        ws.load_packages(&["github.com/user/osext"]).unwrap();

        assert_eq!(ws.status("github.com/user/osext"), ListStatus::Internal);
        assert_eq!(
            ws.status("example.com/app/internal/github.com/user/osext"),
            ListStatus::Internal
        );
    }

    #[test]
    fn test_load_is_deterministic() {
        let fx = WorkspaceFixture::new();
        fx.std_package("fmt");
        fx.std_package("os");
        let project = fx.init_project("example.com/app");
        for i in 0..20 {
            fx.write_go(
                &project.join(format!("pkg{}", i)),
                "p.go",
                &format!("pkg{}", i),
                &["fmt", "os"],
            );
        }

        let mut ws = fx.workspace(&project);
        ws.load_packages(&[]).unwrap();
        let first: Vec<Package> = ws.packages().cloned().collect();
        let first_files = ws.files_importing("fmt");

        ws.load_packages(&[]).unwrap();
        let second: Vec<Package> = ws.packages().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(first_files, ws.files_importing("fmt"));
        assert_eq!(first_files.len(), 20);
    }

    #[test]
    fn test_parse_error_fails_load() {
        let fx = WorkspaceFixture::new();
        let project = fx.init_project("example.com/app");
        fx.write_go(&project, "main.go", "main", &[]);
        std::fs::write(project.join("broken.go"), "package main\nimport (\n\t\"fmt\n").unwrap();

        let mut ws = fx.workspace(&project);
        let err = ws.load_packages(&[]).unwrap_err();

        let msg = format!("{:#}", err);
        assert!(msg.contains("broken.go"));
        assert!(err
            .chain()
            .any(|e| e.downcast_ref::<crate::source::ImportSyntaxError>().is_some()));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let fx = WorkspaceFixture::new();
        let project = fx.init_project("example.com/app");
        let nested = project.join("cmd/tool");
        std::fs::create_dir_all(&nested).unwrap();

        let ws = Workspace::discover(
            &nested,
            fx.roots(),
            ScanOptions::default(),
            Box::new(crate::source::GoImportParser),
        )
        .unwrap();
        assert_eq!(ws.root_dir(), normalize_path(&project));
    }
}

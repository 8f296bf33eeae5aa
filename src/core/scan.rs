//! Source tree walking.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

/// Which files count as source and which directories are skipped.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extensions (without the dot) treated as source files.
    pub extensions: Vec<String>,

    /// Directory name patterns that are never descended into.
    pub skip_dirs: Vec<glob::Pattern>,

    /// Worker threads used for parsing. `None` uses rayon's default.
    pub jobs: Option<usize>,
}

impl ScanOptions {
    pub const DEFAULT_EXTENSIONS: &'static [&'static str] = &["go"];
    pub const DEFAULT_SKIP_DIRS: &'static [&'static str] = &["testdata"];

    /// Build options from extension and skip pattern lists.
    pub fn new(extensions: &[String], skip_dirs: &[String], jobs: Option<usize>) -> Result<Self> {
        let skip_dirs = skip_dirs
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("invalid skip_dirs pattern: {}", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ScanOptions {
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            skip_dirs,
            jobs,
        })
    }

    /// Whether a directory name is excluded from the walk.
    ///
    /// Hidden (`.`) and underscore-prefixed directories are always skipped.
    pub fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.')
            || name.starts_with('_')
            || self.skip_dirs.iter().any(|p| p.matches(name))
    }

    /// Whether a file is a source file.
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Run `f` on a worker pool bounded by `jobs`.
    ///
    /// Without a limit, `f` runs on rayon's global pool.
    pub fn install<T, F>(&self, f: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("failed to build worker pool")?;
                Ok(pool.install(f))
            }
            None => Ok(f()),
        }
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map_or(true, |name| !self.skips_dir(name))
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            extensions: Self::DEFAULT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_dirs: Self::DEFAULT_SKIP_DIRS
                .iter()
                .filter_map(|p| glob::Pattern::new(p).ok())
                .collect(),
            jobs: None,
        }
    }
}

/// Collect every source file under `root`, sorted by path.
pub fn source_files(root: &Path, opts: &ScanOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| opts.keep(e));

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && opts.is_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

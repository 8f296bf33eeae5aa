//! Import rewriting.
//!
//! Rewriting happens in two stages. [`plan_rewrites`] reads and parses every
//! file and computes new contents without touching the disk; any read or
//! parse failure aborts the whole batch. [`apply_rewrites`] then replaces
//! each changed file atomically, one at a time.

use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::source::{ImportParser, ImportSyntaxError};
use crate::util::fs;

/// Replace imports of `from` with `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub from: String,
    pub to: String,
}

impl Rule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// New contents computed for one file.
#[derive(Debug, Clone)]
pub struct PlannedRewrite {
    pub path: PathBuf,
    pub contents: String,
}

/// Outcome of a rewrite batch.
#[derive(Debug, Clone, Default)]
pub struct RewriteSummary {
    /// Files whose imports changed.
    pub rewritten: Vec<PathBuf>,

    /// Files left untouched.
    pub unchanged: Vec<PathBuf>,
}

/// Apply `rules` to the import declarations of `source`.
///
/// Only path literals change; aliases, comments and formatting are kept.
/// The first rule whose `from` equals a declaration's path wins. Returns
/// `None` when nothing would change.
pub fn rewrite_source(
    name: &str,
    source: &str,
    rules: &[Rule],
    parser: &dyn ImportParser,
) -> Result<Option<String>, ImportSyntaxError> {
    let decls = parser.parse(name, source)?;

    let edits: Vec<(Range<usize>, String)> = decls
        .iter()
        .filter_map(|decl| {
            rules
                .iter()
                .find(|rule| rule.from == decl.path)
                .map(|rule| (decl.span.clone(), decl.literal_for(&rule.to)))
        })
        .collect();
    if edits.is_empty() {
        return Ok(None);
    }

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for (span, literal) in edits {
        out.push_str(&source[last..span.start]);
        out.push_str(&literal);
        last = span.end;
    }
    out.push_str(&source[last..]);

    Ok((out != source).then_some(out))
}

/// Compute the new contents of every file that `rules` would change.
///
/// Fails without side effects if any file cannot be read or parsed.
pub fn plan_rewrites(
    files: &[PathBuf],
    rules: &[Rule],
    parser: &dyn ImportParser,
) -> Result<Vec<PlannedRewrite>> {
    let results: Vec<Result<Option<PlannedRewrite>>> = files
        .par_iter()
        .map(|path| plan_file(path, rules, parser))
        .collect();

    let mut planned = Vec::new();
    for result in results {
        if let Some(rewrite) = result? {
            planned.push(rewrite);
        }
    }
    Ok(planned)
}

fn plan_file(path: &Path, rules: &[Rule], parser: &dyn ImportParser) -> Result<Option<PlannedRewrite>> {
    let source = fs::read_to_string(path)?;
    let name = path.display().to_string();
    let contents = rewrite_source(&name, &source, rules, parser)
        .map_err(|e| anyhow::Error::new(e).context(format!("failed to parse imports in {}", name)))?;

    Ok(contents.map(|contents| PlannedRewrite {
        path: path.to_path_buf(),
        contents,
    }))
}

/// Write planned rewrites to disk, one file at a time.
pub fn apply_rewrites(planned: &[PlannedRewrite]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(planned.len());
    for rewrite in planned {
        fs::write_atomic(&rewrite.path, rewrite.contents.as_bytes())?;
        tracing::debug!("rewrote imports in {}", rewrite.path.display());
        written.push(rewrite.path.clone());
    }
    Ok(written)
}

/// Rewrite imports in `files` according to `rules`.
///
/// Files without matching imports are not written.
pub fn rewrite_files(
    files: &[PathBuf],
    rules: &[Rule],
    parser: &dyn ImportParser,
) -> Result<RewriteSummary> {
    let planned = plan_rewrites(files, rules, parser)?;
    let rewritten = apply_rewrites(&planned)?;
    let unchanged = files
        .iter()
        .filter(|f| !rewritten.contains(f))
        .cloned()
        .collect();

    Ok(RewriteSummary {
        rewritten,
        unchanged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::GoImportParser;
    use tempfile::TempDir;

    const SOURCE: &str = r#"// Package main is a demo.
package main

import (
	"fmt" // keep me
	foo "example.com/foo"
	"example.com/foo/sub"
)

import "example.com/foo"

func main() { fmt.Println(foo.X, "example.com/foo") }
"#;

    fn rule() -> Vec<Rule> {
        vec![Rule::new("example.com/foo", "example.com/app/internal/example.com/foo")]
    }

    #[test]
    fn test_rewrite_source_only_changes_literals() {
        let out = rewrite_source("main.go", SOURCE, &rule(), &GoImportParser)
            .unwrap()
            .unwrap();

        let expected = SOURCE
            .replacen(
                "foo \"example.com/foo\"",
                "foo \"example.com/app/internal/example.com/foo\"",
                1,
            )
            .replacen(
                "import \"example.com/foo\"",
                "import \"example.com/app/internal/example.com/foo\"",
                1,
            );
        assert_eq!(out, expected);
        // Subpackages and string literals in code are not imports of the rule path.
        assert!(out.contains("\"example.com/foo/sub\""));
        assert!(out.contains("foo.X, \"example.com/foo\")"));
        assert!(out.contains("\"fmt\" // keep me"));
    }

    #[test]
    fn test_rewrite_source_no_match() {
        let rules = vec![Rule::new("other.org/x", "y")];
        assert_eq!(
            rewrite_source("main.go", SOURCE, &rules, &GoImportParser).unwrap(),
            None
        );
    }

    #[test]
    fn test_rewrite_source_is_idempotent() {
        let once = rewrite_source("main.go", SOURCE, &rule(), &GoImportParser)
            .unwrap()
            .unwrap();
        assert_eq!(
            rewrite_source("main.go", &once, &rule(), &GoImportParser).unwrap(),
            None
        );
    }

    #[test]
    fn test_rewrite_files_skips_unchanged() {
        let tmp = TempDir::new().unwrap();
        let changed = tmp.path().join("main.go");
        let untouched = tmp.path().join("other.go");
        std::fs::write(&changed, SOURCE).unwrap();
        std::fs::write(&untouched, "package main\n\nimport \"fmt\"\n").unwrap();
        let before = std::fs::metadata(&untouched).unwrap().modified().unwrap();

        let files = vec![changed.clone(), untouched.clone()];
        let summary = rewrite_files(&files, &rule(), &GoImportParser).unwrap();

        assert_eq!(summary.rewritten, vec![changed.clone()]);
        assert_eq!(summary.unchanged, vec![untouched.clone()]);
        assert_eq!(
            std::fs::read_to_string(&untouched).unwrap(),
            "package main\n\nimport \"fmt\"\n"
        );
        assert_eq!(std::fs::metadata(&untouched).unwrap().modified().unwrap(), before);

        let first = std::fs::read(&changed).unwrap();
        let again = rewrite_files(&files, &rule(), &GoImportParser).unwrap();
        assert!(again.rewritten.is_empty());
        assert_eq!(std::fs::read(&changed).unwrap(), first);
    }

    #[test]
    fn test_parse_failure_aborts_batch() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("a.go");
        let bad = tmp.path().join("b.go");
        std::fs::write(&good, SOURCE).unwrap();
        std::fs::write(&bad, "package main\nimport (\n\t\"example.com/foo\"\n").unwrap();

        let err = rewrite_files(&[good.clone(), bad], &rule(), &GoImportParser).unwrap_err();

        assert!(format!("{:#}", err).contains("b.go"));
        assert_eq!(std::fs::read_to_string(&good).unwrap(), SOURCE);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            Rule::new("example.com/foo", "first.com/foo"),
            Rule::new("example.com/foo", "second.com/foo"),
        ];
        let out = rewrite_source("main.go", SOURCE, &rules, &GoImportParser)
            .unwrap()
            .unwrap();
        assert!(out.contains("foo \"first.com/foo\""));
        assert!(!out.contains("second.com"));
    }
}

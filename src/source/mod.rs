//! Import declaration parsing.
//!
//! The workspace and the rewriter only need to know which packages a file
//! imports and where each path literal sits in the text. Parsers implement
//! [`ImportParser`]; [`GoImportParser`] handles Go source files.

mod go;

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub use go::GoImportParser;

/// A single import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// The imported path, without quotes.
    pub path: String,

    /// Package name given before the path (`_`, `.`, or an identifier).
    pub alias: Option<String>,

    /// Byte range of the path literal, quotes included.
    pub span: Range<usize>,

    /// Whether the literal is a raw (backquoted) string.
    pub raw: bool,
}

impl ImportDecl {
    /// The literal that would replace this declaration's path with `path`.
    pub fn literal_for(&self, path: &str) -> String {
        if self.raw {
            format!("`{}`", path)
        } else {
            format!("\"{}\"", path)
        }
    }
}

/// Malformed import syntax.
#[derive(Debug, Error, Diagnostic)]
#[error("{file}:{line}:{column}: {message}")]
#[diagnostic(code(quay::import_syntax))]
pub struct ImportSyntaxError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,
}

impl ImportSyntaxError {
    /// Build an error pointing at `offset` in `source`.
    pub fn new(file: &str, source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;
        let len = source[offset..].chars().next().map_or(0, char::len_utf8);

        ImportSyntaxError {
            file: file.to_string(),
            line,
            column,
            message: message.into(),
            src: NamedSource::new(file, source.to_string()),
            span: (offset, len).into(),
        }
    }
}

/// Extracts import declarations from source text.
pub trait ImportParser: Send + Sync {
    /// Parse the imports of `source`. `name` is only used in diagnostics.
    fn parse(&self, name: &str, source: &str) -> Result<Vec<ImportDecl>, ImportSyntaxError>;

    /// Read and parse a file, returning the source alongside its imports.
    fn parse_file(&self, path: &Path) -> Result<(String, Vec<ImportDecl>)> {
        let source = crate::util::fs::read_to_string(path)?;
        let imports = self
            .parse(&path.display().to_string(), &source)
            .with_context(|| format!("failed to parse imports in {}", path.display()))?;
        Ok((source, imports))
    }
}

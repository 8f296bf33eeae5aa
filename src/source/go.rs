//! Go import clause scanner.
//!
//! Only the file header is scanned: the `package` clause followed by any
//! number of `import` declarations, single or parenthesized. Scanning stops
//! at the first token that does not start an import declaration.

use super::{ImportDecl, ImportParser, ImportSyntaxError};

/// Parser for `.go` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoImportParser;

impl ImportParser for GoImportParser {
    fn parse(&self, name: &str, source: &str) -> Result<Vec<ImportDecl>, ImportSyntaxError> {
        Scanner::new(name, source).imports()
    }
}

struct Scanner<'a> {
    name: &'a str,
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(name: &'a str, src: &'a str) -> Self {
        let pos = if src.starts_with('\u{feff}') { 3 } else { 0 };
        Scanner { name, src, pos }
    }

    fn imports(mut self) -> Result<Vec<ImportDecl>, ImportSyntaxError> {
        self.skip_trivia()?;
        if !self.eat_keyword("package") {
            return Err(self.error("expected `package` clause"));
        }
        self.skip_trivia()?;
        if self.ident().is_none() {
            return Err(self.error("expected package name"));
        }

        let mut decls = Vec::new();
        loop {
            self.skip_trivia()?;
            if !self.eat_keyword("import") {
                break;
            }
            self.skip_trivia()?;
            if self.eat('(') {
                loop {
                    self.skip_trivia()?;
                    if self.eat(')') {
                        break;
                    }
                    if self.at_end() {
                        return Err(self.error("unclosed import group"));
                    }
                    decls.push(self.import_spec()?);
                }
            } else {
                decls.push(self.import_spec()?);
            }
        }
        Ok(decls)
    }

    fn import_spec(&mut self) -> Result<ImportDecl, ImportSyntaxError> {
        let alias = if self.eat('.') {
            Some(".".to_string())
        } else {
            self.ident().map(str::to_string)
        };
        if alias.is_some() {
            self.skip_trivia()?;
        }

        let start = self.pos;
        let (path, raw) = match self.peek() {
            Some('"') => (self.interpreted_string()?, false),
            Some('`') => (self.raw_string()?, true),
            _ => return Err(self.error("expected import path")),
        };
        if path.is_empty() {
            return Err(self.error_at(start, "empty import path"));
        }

        Ok(ImportDecl {
            path,
            alias,
            span: start..self.pos,
            raw,
        })
    }

    fn interpreted_string(&mut self) -> Result<String, ImportSyntaxError> {
        let start = self.pos;
        self.bump();
        let body_start = self.pos;
        loop {
            match self.peek() {
                Some('"') => {
                    let body = &self.src[body_start..self.pos];
                    self.bump();
                    return Ok(body.to_string());
                }
                Some('\\') => {
                    return Err(self.error("escape sequences are not supported in import paths"))
                }
                Some('\n') | None => return Err(self.error_at(start, "unterminated string")),
                Some(_) => self.bump(),
            }
        }
    }

    fn raw_string(&mut self) -> Result<String, ImportSyntaxError> {
        let start = self.pos;
        self.bump();
        let body_start = self.pos;
        match self.src[body_start..].find('`') {
            Some(len) => {
                self.pos = body_start + len + 1;
                Ok(self.src[body_start..body_start + len].to_string())
            }
            None => Err(self.error_at(start, "unterminated raw string")),
        }
    }

    /// Skip whitespace, comments and semicolons.
    fn skip_trivia(&mut self) -> Result<(), ImportSyntaxError> {
        loop {
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => return Err(self.error("unterminated block comment")),
                }
            } else if let Some(c) = self.peek().filter(|c| c.is_whitespace() || *c == ';') {
                self.pos += c.len_utf8();
            } else {
                return Ok(());
            }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let src: &'a str = self.src;
        let rest = &src[self.pos..];
        let first = rest.chars().next()?;
        if !is_ident_start(first) {
            return None;
        }
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_ident_continue(*c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += len;
        Some(&rest[..len])
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.src[self.pos..];
        let Some(after) = rest.strip_prefix(keyword) else {
            return false;
        };
        if after.chars().next().is_some_and(is_ident_continue) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn error(&self, message: &str) -> ImportSyntaxError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: &str) -> ImportSyntaxError {
        ImportSyntaxError::new(self.name, self.src, offset, message)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

use crate::position::Point;
use ast_grep_language::{LanguageExt, SupportLang};
use thiserror::Error;
use tree_sitter::{Parser, Tree};

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source text")]
    ParseFailed,
}

/// Tree-sitter parser for the playground's source buffer.
///
/// Every call to [`SourceParser::parse`] is a full reparse; the playground
/// keeps no incremental state between cycles.
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        // Get the tree-sitter Language from ast-grep-language so the
        // grammar matches what pattern matching uses.
        let ts_lang = SupportLang::Rust.get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| ParserError::LanguageSet)?;

        Ok(Self { parser })
    }

    /// Parse `source` into a concrete syntax tree.
    pub fn parse<'a>(&mut self, source: &'a str) -> Result<ParsedSource<'a>, ParserError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParserError::ParseFailed)?;
        Ok(ParsedSource { source, tree })
    }
}

/// A parsed source buffer with its concrete syntax tree.
pub struct ParsedSource<'a> {
    source: &'a str,
    tree: Tree,
}

impl ParsedSource<'_> {
    /// Structural errors in document order (pre-order traversal), so the
    /// first entry is the earliest error in the file.
    pub fn errors(&self) -> Vec<ParseError> {
        let mut errors = Vec::new();
        collect_errors(self.source, self.tree.root_node(), &mut errors);
        errors
    }

    /// Whether the tree contains any named node besides error-recovery
    /// artifacts. Parsing pure garbage yields only ERROR wrappers around
    /// raw tokens; anything with real structure has at least one named
    /// child somewhere.
    pub fn has_named_content(&self) -> bool {
        has_named_nodes(self.tree.root_node())
    }
}

/// One structural error reported by the parser.
#[derive(Debug, Clone)]
pub struct ParseError {
    kind: ParseErrorKind,
    /// 0-based position of the offending region.
    pub start: Point,
}

#[derive(Debug, Clone)]
enum ParseErrorKind {
    /// The parser inserted a zero-width token to recover.
    Missing(String),
    /// A region the grammar could not assign any structure.
    Unexpected,
}

impl ParseError {
    /// Human-readable message with 1-based coordinates.
    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::Missing(token) => format!(
                "missing '{}' at line {}, column {}",
                token,
                self.start.line + 1,
                self.start.column + 1
            ),
            ParseErrorKind::Unexpected => format!(
                "unexpected input at line {}, column {}",
                self.start.line + 1,
                self.start.column + 1
            ),
        }
    }
}

fn has_named_nodes(node: tree_sitter::Node<'_>) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_named() && !child.is_error() && !child.is_missing() {
            return true;
        }
        if has_named_nodes(child) {
            return true;
        }
    }
    false
}

fn collect_errors(source: &str, node: tree_sitter::Node<'_>, errors: &mut Vec<ParseError>) {
    if node.is_missing() {
        errors.push(ParseError {
            kind: ParseErrorKind::Missing(node.kind().to_string()),
            start: Point::of_byte(source, node.start_byte()),
        });
    } else if node.is_error() {
        errors.push(ParseError {
            kind: ParseErrorKind::Unexpected,
            start: Point::of_byte(source, node.start_byte()),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(source, child, errors);
    }
}

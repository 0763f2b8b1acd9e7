use crate::parser::SourceParser;
use crate::position::Point;
use ast_grep_core::{AstGrep, Pattern};
use ast_grep_language::SupportLang;
use std::ops::Range;
use thiserror::Error;

/// Failure to compile the query buffer into a pattern.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
    /// Byte span of the query text the error is anchored to, for hosts
    /// that render inline diagnostics. Pattern compilation reports no
    /// finer position, so this covers the whole query.
    pub span: Range<usize>,
}

/// A compiled structural pattern, reusable across sources.
///
/// # Pattern Syntax
///
/// ast-grep metavariable syntax:
///
/// - `$NAME` - matches a single named node and captures it
/// - `$$NAME` - like `$NAME` but matches unnamed nodes too
/// - `$$$NAME` - matches zero or more nodes (variadic)
/// - `$_` - matches any single node without capturing
///
/// ```text
/// fn $NAME($$$PARAMS) { $$$BODY }
/// $EXPR.clone()
/// ```
pub struct CompiledQuery {
    pattern: Pattern,
    capture_names: Vec<String>,
}

impl CompiledQuery {
    /// Compile `query_text` as a pattern over the Rust grammar.
    ///
    /// The text is first checked by parsing it with metavariables
    /// replaced by placeholder identifiers: input that yields no syntax
    /// at all is rejected here with a stable message. Patterns with
    /// partial structure (struct bodies, bare expressions) pass through
    /// to the matching engine, which tolerates them.
    pub fn compile(query_text: &str) -> Result<Self, QueryError> {
        let err = |message: String| QueryError {
            message,
            span: 0..query_text.len(),
        };

        let mut parser = SourceParser::new().map_err(|e| err(e.to_string()))?;
        let normalized = normalize_metavars(query_text);
        let parsed = parser.parse(&normalized).map_err(|e| err(e.to_string()))?;
        if !parsed.has_named_content() {
            return Err(err("pattern does not parse as Rust syntax".to_string()));
        }

        let pattern = Pattern::try_new(query_text, SupportLang::Rust)
            .map_err(|e| err(e.to_string()))?;

        Ok(Self {
            pattern,
            capture_names: capture_names(query_text),
        })
    }

    /// Capture names in the order the query introduced them.
    pub fn capture_names(&self) -> &[String] {
        &self.capture_names
    }

    /// Run the pattern over `source`, collecting every match eagerly.
    ///
    /// Matches arrive in document order of their root node and are never
    /// reordered or deduplicated here.
    pub fn run(&self, source: &str) -> Vec<QueryMatch> {
        let sg = AstGrep::new(source, SupportLang::Rust);
        let root = sg.root();

        let mut results = Vec::new();
        for m in root.find_all(&self.pattern) {
            let start = Point::of_byte(source, m.get_node().range().start);
            let env = m.get_env();

            let mut entries = Vec::new();
            for name in &self.capture_names {
                let mut nodes = Vec::new();
                if let Some(node) = env.get_match(name) {
                    nodes.push(captured(source, node.range()));
                } else {
                    for node in env.get_multiple_matches(name) {
                        nodes.push(captured(source, node.range()));
                    }
                }
                entries.push((name.clone(), nodes));
            }

            results.push(QueryMatch {
                start,
                captures: CaptureMap::new(entries),
            });
        }

        results
    }
}

/// One structural match of the query against the tree.
#[derive(Debug, Clone)]
pub struct QueryMatch {
    /// 0-based start of the whole matched node.
    pub start: Point,
    pub captures: CaptureMap,
}

/// Ordered capture mapping: names in the order the query introduced them,
/// nodes within a name in binding (document) order.
///
/// An explicit pair list rather than a hash map, so iteration order is a
/// contract and not an accident of the container.
#[derive(Debug, Clone, Default)]
pub struct CaptureMap(Vec<(String, Vec<CapturedNode>)>);

impl CaptureMap {
    pub fn new(entries: Vec<(String, Vec<CapturedNode>)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CapturedNode])> {
        self.0.iter().map(|(name, nodes)| (name.as_str(), nodes.as_slice()))
    }

    /// Whether any name has at least one bound node.
    pub fn has_bindings(&self) -> bool {
        self.0.iter().any(|(_, nodes)| !nodes.is_empty())
    }
}

/// A captured node: where it starts and its exact source text.
#[derive(Debug, Clone)]
pub struct CapturedNode {
    /// 0-based start position.
    pub start: Point,
    /// Exact text of the node, sliced from the source (the CST preserves
    /// all source text, so this reconstructs the node verbatim).
    pub text: String,
}

fn captured(source: &str, range: Range<usize>) -> CapturedNode {
    CapturedNode {
        start: Point::of_byte(source, range.start),
        text: source[range].to_string(),
    }
}

/// Rewrite metavariables to placeholder identifiers so the pattern text
/// can be checked against the real grammar (`$NAME` is not a Rust token).
fn normalize_metavars(query_text: &str) -> String {
    let mut out = String::with_capacity(query_text.len());
    let mut chars = query_text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        while chars.peek() == Some(&'$') {
            chars.next();
        }
        out.push_str("__mv_");
        while let Some(&n) = chars.peek() {
            if n.is_ascii_uppercase() || n.is_ascii_digit() || n == '_' {
                out.push(n);
                chars.next();
            } else {
                break;
            }
        }
    }

    out
}

/// Capturing metavariable names in order of first appearance.
///
/// `$NAME`, `$$NAME`, and `$$$NAME` all capture (the double-dollar form
/// matches unnamed nodes too); `$_FOO` does not, matching ast-grep's own
/// rules. Names are uppercase ASCII.
fn capture_names(query_text: &str) -> Vec<String> {
    let bytes = query_text.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        let mut dollars = 0;
        while i < bytes.len() && bytes[i] == b'$' {
            dollars += 1;
            i += 1;
        }

        let start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_uppercase() || bytes[i] == b'_' || bytes[i].is_ascii_digit())
        {
            i += 1;
        }
        let name = &query_text[start..i];

        let captures = (1..=3).contains(&dollars)
            && name.starts_with(|c: char| c.is_ascii_uppercase());
        if captures && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    names
}

//! Rendering of match sequences into the playground report.
//!
//! All 1-based line/column conversion happens here, at the formatting
//! boundary; everything upstream stays 0-based.

use crate::query::{CapturedNode, QueryMatch};

/// Captured text shorter than this is shown inline next to its position;
/// anything longer is omitted entirely (no truncation, no ellipsis).
const INLINE_TEXT_LIMIT: usize = 10;

/// One report line for a single captured node.
pub fn format_capture(name: &str, node: &CapturedNode) -> String {
    let mut line = format!(
        "        {}: {}:{}",
        name,
        node.start.line + 1,
        node.start.column + 1
    );
    if node.text.chars().count() < INLINE_TEXT_LIMIT {
        line.push_str(&format!(" ({})", node.text));
    }
    line.push('\n');
    line
}

/// Render the full report for a non-empty match sequence.
///
/// Matches keep engine order. Each block ends with a newline and blocks
/// are separated by exactly one blank line; capture groups iterate in the
/// order the query introduced them, nodes within a group in binding order.
pub fn format_matches(matches: &[QueryMatch]) -> String {
    let mut out = String::new();

    for (i, m) in matches.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        out.push_str(&format!("Match {}:\n", i + 1));
        out.push_str(&format!("    Line: {}\n", m.start.line + 1));

        if m.captures.has_bindings() {
            out.push_str("    Captures:\n");
            for (name, nodes) in m.captures.iter() {
                for node in nodes {
                    out.push_str(&format_capture(name, node));
                }
            }
        } else {
            out.push_str("    No captures\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Point;
    use crate::query::CaptureMap;

    fn node(line: usize, column: usize, text: &str) -> CapturedNode {
        CapturedNode {
            start: Point { line, column },
            text: text.to_string(),
        }
    }

    fn match_at(line: usize, entries: Vec<(String, Vec<CapturedNode>)>) -> QueryMatch {
        QueryMatch {
            start: Point { line, column: 0 },
            captures: CaptureMap::new(entries),
        }
    }

    #[test]
    fn capture_line_converts_to_one_based() {
        let line = format_capture("NAME", &node(0, 3, "foo"));
        assert_eq!(line, "        NAME: 1:4 (foo)\n");
    }

    #[test]
    fn nine_chars_inlined_ten_omitted() {
        let nine = format_capture("N", &node(0, 0, "abcdefghi"));
        assert_eq!(nine, "        N: 1:1 (abcdefghi)\n");

        let ten = format_capture("N", &node(0, 0, "abcdefghij"));
        assert_eq!(ten, "        N: 1:1\n");
    }

    #[test]
    fn inline_limit_counts_chars_not_bytes() {
        // nine chars, eighteen bytes
        let line = format_capture("N", &node(0, 0, "ééééééééé"));
        assert!(line.contains("(ééééééééé)"));
    }

    #[test]
    fn match_without_bindings_says_no_captures() {
        let report = format_matches(&[match_at(0, vec![])]);
        assert_eq!(report, "Match 1:\n    Line: 1\n    No captures\n");
    }

    #[test]
    fn group_with_only_empty_bindings_says_no_captures() {
        let report = format_matches(&[match_at(0, vec![("BODY".into(), vec![])])]);
        assert_eq!(report, "Match 1:\n    Line: 1\n    No captures\n");
        assert!(!report.contains("Captures:"));
    }

    #[test]
    fn blocks_separated_by_single_blank_line() {
        let report = format_matches(&[match_at(0, vec![]), match_at(2, vec![])]);
        assert_eq!(
            report,
            "Match 1:\n    Line: 1\n    No captures\n\nMatch 2:\n    Line: 3\n    No captures\n"
        );
    }

    #[test]
    fn groups_keep_introduction_order_nodes_keep_binding_order() {
        let entries = vec![
            ("B".to_string(), vec![node(0, 0, "x"), node(0, 5, "y")]),
            ("A".to_string(), vec![node(1, 0, "z")]),
        ];
        let report = format_matches(&[match_at(0, entries)]);
        assert_eq!(
            report,
            "Match 1:\n    Line: 1\n    Captures:\n        B: 1:1 (x)\n        B: 1:6 (y)\n        A: 2:1 (z)\n"
        );
    }
}

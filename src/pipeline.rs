//! The evaluation pipeline: two buffer strings in, one report string out.

use crate::parser::SourceParser;
use crate::query::CompiledQuery;
use crate::report;

/// Shown until there is both source and a query to evaluate.
pub const PLACEHOLDER: &str = "Write Rust code and a pattern to see the results here.";

/// Terminal text when a valid query matches nothing.
pub const NO_MATCHES: &str = "No matches found.";

/// Evaluate one playground cycle.
///
/// Pure function of its two inputs. Stages run in strict order, each a
/// short-circuit point:
///
/// 1. parse the source; a structural error returns the *first* error's
///    message, prefixed, regardless of the query
/// 2. a whitespace-only query returns the placeholder (not an error)
/// 3. a pattern that fails to compile returns a one-line message
/// 4. a pattern with no matches returns [`NO_MATCHES`]
/// 5. otherwise the rendered match report
///
/// Nothing here panics on user input; both recoverable failure points
/// come back as `Result`s and turn into messages.
pub fn evaluate(source_text: &str, query_text: &str) -> String {
    let mut parser = match SourceParser::new() {
        Ok(parser) => parser,
        Err(e) => return format!("Error parsing the Rust file: {e}"),
    };
    let parsed = match parser.parse(source_text) {
        Ok(parsed) => parsed,
        Err(e) => return format!("Error parsing the Rust file: {e}"),
    };

    let errors = parsed.errors();
    if let Some(first) = errors.first() {
        return format!("Error parsing the Rust file: {}", first.message());
    }

    if query_text.trim().is_empty() {
        return PLACEHOLDER.to_string();
    }

    let query = match CompiledQuery::compile(query_text) {
        Ok(query) => query,
        Err(e) => return format!("Error parsing the query: {}", e.message),
    };

    let matches = query.run(source_text);
    if matches.is_empty() {
        return NO_MATCHES.to_string();
    }

    report::format_matches(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_shows_placeholder() {
        assert_eq!(evaluate("fn main() {}", ""), PLACEHOLDER);
        assert_eq!(evaluate("fn main() {}", "   "), PLACEHOLDER);
    }

    #[test]
    fn empty_query_never_reports_no_matches() {
        assert_ne!(evaluate("fn main() {}", "  \n  "), NO_MATCHES);
    }

    #[test]
    fn parse_error_takes_precedence_over_query() {
        for query in ["", "fn main() {}", "[[["] {
            let out = evaluate("fn foo() {", query);
            assert!(
                out.starts_with("Error parsing the Rust file: "),
                "unexpected output for query {query:?}: {out}"
            );
        }
    }

    #[test]
    fn malformed_query_reports_query_error() {
        let out = evaluate("fn main() {}", "[[[");
        assert!(out.starts_with("Error parsing the query: "));
    }

    #[test]
    fn valid_query_without_matches() {
        assert_eq!(evaluate("fn main() {}", "fn other() {}"), NO_MATCHES);
    }

    #[test]
    fn valid_query_with_match() {
        let out = evaluate("fn main() {}", "fn main() { $$$ }");
        assert_eq!(out, "Match 1:\n    Line: 1\n    No captures\n");
    }
}

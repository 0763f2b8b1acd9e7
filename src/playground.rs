//! The stateful shell around the pure pipeline: two live buffers and the
//! current report, re-evaluated on every edit.

use crate::pipeline;

/// Which buffer an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    Source,
    Query,
}

/// One discrete edit delivered by the host editor surface.
#[derive(Debug, Clone)]
pub struct EditEvent {
    pub buffer: Buffer,
    /// The buffer's full new contents, not a delta.
    pub text: String,
}

/// Seed source: two declarations, so the seed query can single one out.
pub const SEED_SOURCE: &str = "fn foo() {}\n\nfn bar() {}";

/// Seed query: matches one declaration by name.
pub const SEED_QUERY: &str = "fn foo() { $$$ }";

/// Owns the two live buffers and the current report.
///
/// Edits arrive one at a time through [`Playground::on_change`]; each call
/// runs the full pipeline synchronously and replaces the report wholesale.
/// Taking `&mut self` keeps delivery serialized, so the stored report
/// always reflects the latest buffer contents and a stale evaluation can
/// never overwrite a fresher one.
#[derive(Debug, Clone)]
pub struct Playground {
    source: String,
    query: String,
    report: String,
}

impl Playground {
    /// Create a playground with explicit initial contents, evaluating
    /// eagerly so the report is populated from the start.
    pub fn new(source: impl Into<String>, query: impl Into<String>) -> Self {
        let source = source.into();
        let query = query.into();
        let report = pipeline::evaluate(&source, &query);
        Self {
            source,
            query,
            report,
        }
    }

    /// Create a playground populated with the seed example.
    pub fn seeded() -> Self {
        Self::new(SEED_SOURCE, SEED_QUERY)
    }

    /// Apply one edit and return the freshly rendered report.
    pub fn on_change(&mut self, event: EditEvent) -> &str {
        match event.buffer {
            Buffer::Source => self.source = event.text,
            Buffer::Query => self.query = event.text,
        }
        self.report = pipeline::evaluate(&self.source, &self.query);
        &self.report
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current report, exactly as last pushed to the display region.
    pub fn report(&self) -> &str {
        &self.report
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{evaluate, NO_MATCHES, PLACEHOLDER};

    fn edit(buffer: Buffer, text: &str) -> EditEvent {
        EditEvent {
            buffer,
            text: text.to_string(),
        }
    }

    #[test]
    fn seeded_playground_has_initial_report() {
        let playground = Playground::seeded();
        assert_eq!(playground.report(), "Match 1:\n    Line: 1\n    No captures\n");
    }

    #[test]
    fn report_matches_pure_evaluation() {
        let mut playground = Playground::seeded();
        playground.on_change(edit(Buffer::Query, "fn $NAME() {}"));

        assert_eq!(
            playground.report(),
            evaluate(SEED_SOURCE, "fn $NAME() {}")
        );
    }

    #[test]
    fn source_edit_replaces_report_wholesale() {
        let mut playground = Playground::seeded();
        playground.on_change(edit(Buffer::Source, "fn baz() {}"));

        assert_eq!(playground.report(), NO_MATCHES);
        assert_eq!(playground.source(), "fn baz() {}");
        assert_eq!(playground.query(), SEED_QUERY);
    }

    #[test]
    fn broken_source_then_fixed_source_recovers() {
        let mut playground = Playground::seeded();

        let report = playground.on_change(edit(Buffer::Source, "fn foo() {")).to_string();
        assert!(report.starts_with("Error parsing the Rust file: "));

        playground.on_change(edit(Buffer::Source, SEED_SOURCE));
        assert_eq!(playground.report(), "Match 1:\n    Line: 1\n    No captures\n");
    }

    #[test]
    fn clearing_query_shows_placeholder() {
        let mut playground = Playground::seeded();
        assert_eq!(playground.on_change(edit(Buffer::Query, "")), PLACEHOLDER);
    }

    #[test]
    fn latest_edit_wins() {
        let mut playground = Playground::seeded();
        playground.on_change(edit(Buffer::Query, "[[["));
        playground.on_change(edit(Buffer::Query, "fn bar() { $$$ }"));

        assert_eq!(playground.report(), "Match 1:\n    Line: 3\n    No captures\n");
    }
}

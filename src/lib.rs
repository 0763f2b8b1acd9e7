//! Pattern Playground: structural queries over Rust source, live.
//!
//! Two text buffers feed one synchronous pipeline: the user's Rust source
//! and an ast-grep style pattern (`$NAME`, `$$$ITEMS`). On every edit the
//! playground reparses the source, recompiles the pattern, runs it over
//! the concrete syntax tree, and renders a plain-text match report. The
//! report is regenerated in full each cycle; there is no incremental
//! state beyond the two buffers themselves.
//!
//! # Architecture
//!
//! [`pipeline::evaluate`] is a pure function from the two buffer strings
//! to the displayed text. [`Playground`] is the thin stateful shell
//! around it: it owns the buffers, consumes [`EditEvent`]s one at a time,
//! and replaces the report wholesale after each one. Failure handling is
//! staged - a source parse error short-circuits everything downstream, an
//! empty query shows the placeholder, a bad pattern becomes a one-line
//! message, and a valid pattern with no matches is its own terminal state.
//!
//! # Example
//!
//! ```
//! use pattern_playground::{Buffer, EditEvent, Playground};
//!
//! let mut playground = Playground::seeded();
//! assert!(playground.report().starts_with("Match 1:"));
//!
//! let report = playground.on_change(EditEvent {
//!     buffer: Buffer::Query,
//!     text: "fn $NAME() {}".into(),
//! });
//! assert!(report.contains("NAME"));
//! ```

pub mod parser;
pub mod pipeline;
pub mod playground;
pub mod position;
pub mod query;
pub mod report;

// Re-exports
pub use parser::{ParseError, ParsedSource, ParserError, SourceParser};
pub use pipeline::{evaluate, NO_MATCHES, PLACEHOLDER};
pub use playground::{Buffer, EditEvent, Playground, SEED_QUERY, SEED_SOURCE};
pub use position::Point;
pub use query::{CaptureMap, CapturedNode, CompiledQuery, QueryError, QueryMatch};
pub use report::{format_capture, format_matches};

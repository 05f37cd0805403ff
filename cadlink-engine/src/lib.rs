//! CADLink correlation engine.
//!
//! Ties the two halves of the system together: the live drawing reached
//! through [`cadlink_document::LiveDocument`] and the relational snapshot
//! in [`cadlink_store::SnapshotStore`].
//!
//! - [`sync`] rebuilds the snapshot from the live drawing (full rescan,
//!   atomic replace).
//! - [`pattern`] searches live text entities for a literal substring,
//!   persists the count, and highlights matches.
//! - [`correlate`] runs caller-supplied SQL against the snapshot and
//!   projects the result rows back onto the drawing by re-resolving each
//!   handle.
//!
//! All operations are synchronous and assume a single caller at a time per
//! document/store pair; the tool-invocation layer serializes requests.

pub mod correlate;
mod error;
pub mod pattern;
pub mod sync;

pub use correlate::{
    highlight_entity, query_and_highlight, CorrelationOutcome, EntityHighlight, HANDLE_COLUMN,
    QUERY_SELECTION,
};
pub use error::{EngineError, EngineResult};
pub use pattern::{
    count_pattern, highlight_pattern, PatternMatch, PatternReport, MATCH_PREVIEW_LIMIT,
    PATTERN_SELECTION,
};
pub use sync::{scan_drawing, SyncReport};

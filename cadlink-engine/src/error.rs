//! Error types for the correlation engine.
//!
//! Per-item failures (one unreadable entity, one stale handle) are never
//! surfaced here — they are logged and counted inside each operation. Only
//! whole-operation failures become an `EngineError`.

use thiserror::Error;

use cadlink_document::DocumentError;
use cadlink_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Whole-operation failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No drawing is open in the host application.
    #[error("no drawing is open; create or open a drawing first")]
    DocumentUnavailable,

    /// The query result set lacks the identity column, so there is nothing
    /// to correlate. Distinct from a query that returns zero rows.
    #[error("query results contain no 'handle' column")]
    NoHandleColumn,

    /// A single requested handle no longer resolves to a live entity.
    /// Only fatal for single-entity operations; batch correlation counts
    /// stale handles instead.
    #[error("no live entity found for handle '{0}'")]
    HandleUnresolved(String),

    /// Snapshot store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Host document failure.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

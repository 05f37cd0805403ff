//! Error types for the snapshot store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite. Arbitrary caller-supplied query text is
    /// executed unvalidated, so malformed statements land here rather than
    /// being rejected up front.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Property-bag serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<cadlink_types::Error> for StoreError {
    fn from(err: cadlink_types::Error) -> Self {
        match err {
            cadlink_types::Error::Serialization(e) => Self::Serialization(e),
        }
    }
}

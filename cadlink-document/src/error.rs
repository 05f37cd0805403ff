//! Error types for the live-document adapter.

use thiserror::Error;

use crate::EntityRef;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while talking to the host document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No drawing is open in the host application.
    #[error("no drawing is open in the host application")]
    NotOpen,

    /// An enumeration reference no longer resolves to a live entity.
    #[error("entity {0} no longer exists in the document")]
    EntityGone(EntityRef),

    /// A single entity's properties could not be read. Scans skip over
    /// this; it never aborts an enumeration.
    #[error("failed to read entity {entity}: {reason}")]
    ReadFailed { entity: EntityRef, reason: String },

    /// A selection set with this name already exists.
    #[error("selection set '{0}' already exists")]
    SelectionExists(String),

    /// No selection set with this name exists.
    #[error("selection set '{0}' not found")]
    SelectionNotFound(String),

    /// Any other host automation failure.
    #[error("host error: {0}")]
    Host(String),
}

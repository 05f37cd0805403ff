//! Core type definitions for CADLink.
//!
//! This crate defines the fundamental, host-agnostic types shared by the
//! snapshot store, the live-document adapter, and the correlation engine:
//! - Entity records (the relational snapshot of one live entity)
//! - Type-dependent property bags (line / circle / text / other)
//! - Text-pattern search statistics
//!
//! Anything that talks to the host application or to SQLite belongs in the
//! adapter and store crates, not here.

mod properties;
mod record;

pub use properties::EntityProperties;
pub use record::{EntityRecord, PatternStat};

/// Host color index (ACI), 1–255 in practice.
pub type ColorCode = u16;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

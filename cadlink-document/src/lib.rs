//! Live-document adapter for CADLink.
//!
//! The host application owns the drawing; this crate only defines how the
//! core is allowed to touch it. [`LiveDocument`] is a capability trait:
//! enumerate entities, read typed properties, mutate the color attribute,
//! and manage short-lived named selection sets for highlighting and
//! viewport framing. Nothing here retains a live reference — identity is
//! re-resolved by handle at the moment of every mutation, because the
//! document can change between calls.
//!
//! [`MemoryDocument`] is a complete in-memory implementation used by the
//! engine tests and for offline operation. The COM binding to the real
//! host lives in the process-wiring layer and implements the same trait.

mod document;
mod error;
mod memory;

pub use document::{EntityRef, LayerInfo, LiveDocument, LiveEntity};
pub use error::{DocumentError, DocumentResult};
pub use memory::MemoryDocument;

use std::fmt;

use cadlink_types::{ColorCode, EntityProperties};

use crate::DocumentResult;

/// Opaque reference to one entity slot in the current enumeration.
///
/// Valid only until the document changes; never persist one. Durable
/// identity is the host handle carried by [`LiveEntity`], and mutation by
/// handle goes through [`LiveDocument::select_by_handle`] so the lookup is
/// fresh at the moment of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef(pub u64);

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the adapter can read off one live entity in a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEntity {
    /// Host-assigned stable identity; absent if none was ever assigned.
    pub handle: Option<String>,
    /// Full host type tag (`AcDbLine`, `AcDbText`, …).
    pub entity_type: String,
    pub layer: String,
    pub properties: EntityProperties,
}

/// One row of the document's layer table.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub name: String,
    pub color: ColorCode,
    pub is_on: bool,
    pub is_frozen: bool,
    pub is_locked: bool,
}

/// Capability interface over the host application's current document.
///
/// All calls are synchronous and assumed to come from one logical caller
/// at a time; the host automation surface is not thread safe. Named
/// selection sets are the host's ephemeral grouping mechanism — they are
/// document-global, so two concurrent operations using the same fixed name
/// will collide (an accepted constraint of the host environment).
pub trait LiveDocument {
    /// Whether a drawing is currently open.
    fn is_open(&self) -> bool;

    /// Name of the current drawing.
    fn name(&self) -> DocumentResult<String>;

    /// Enumerates the current model space. Finite and restartable; order
    /// is host-defined and not stable across calls.
    fn entities(&self) -> DocumentResult<Vec<EntityRef>>;

    /// Reads one entity's type tag, layer, and property bag. Fails per
    /// entity, never globally.
    fn read_entity(&self, entity: EntityRef) -> DocumentResult<LiveEntity>;

    /// Sets the entity's color attribute, returning the previous color.
    fn set_color(&mut self, entity: EntityRef, color: ColorCode) -> DocumentResult<ColorCode>;

    /// Creates an empty named selection set.
    fn create_selection(&mut self, name: &str) -> DocumentResult<()>;

    /// Deletes a named selection set.
    fn delete_selection(&mut self, name: &str) -> DocumentResult<()>;

    /// Adds an entity to an existing selection set.
    fn add_to_selection(&mut self, name: &str, entity: EntityRef) -> DocumentResult<()>;

    /// Resolves a handle by a fresh identity lookup, selecting the result
    /// into the named selection set. Returns `Ok(None)` when the handle no
    /// longer resolves — staleness is an expected outcome, not an error.
    fn select_by_handle(&mut self, name: &str, handle: &str)
        -> DocumentResult<Option<EntityRef>>;

    /// Frames the viewport around the named selection set.
    fn zoom_to_selection(&mut self, name: &str) -> DocumentResult<()>;

    /// Lists the document's layers.
    fn layers(&self) -> DocumentResult<Vec<LayerInfo>>;
}

use serde::{Deserialize, Serialize};

use crate::EntityProperties;

/// Host type-tag namespace prefix stripped to form the display name.
const HOST_TYPE_PREFIX: &str = "AcDb";

/// The relational snapshot of one live drawing entity.
///
/// `handle` is the host-assigned stable identity and the correlation key
/// back to the live drawing. It is `None` when the live object had no
/// handle assigned at capture time; such records are stored but can never
/// be re-resolved against the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub handle: Option<String>,
    /// Short human-readable type label (`Line`, `Circle`, `MText`, …).
    pub name: String,
    /// Full host type tag (`AcDbLine`, `AcDbCircle`, …); drives property
    /// extraction.
    pub entity_type: String,
    /// Layer the entity belonged to at capture time.
    pub layer: String,
    pub properties: EntityProperties,
}

impl EntityRecord {
    /// Builds a record from a raw host type tag, deriving the display name
    /// by stripping the host namespace prefix.
    pub fn new(
        handle: Option<String>,
        entity_type: impl Into<String>,
        layer: impl Into<String>,
        properties: EntityProperties,
    ) -> Self {
        let entity_type = entity_type.into();
        let name = entity_type
            .strip_prefix(HOST_TYPE_PREFIX)
            .unwrap_or(&entity_type)
            .to_string();
        Self {
            handle,
            name,
            entity_type,
            layer: layer.into(),
            properties,
        }
    }
}

/// Aggregate result of one text-pattern search, keyed by the pattern text.
///
/// Each search overwrites the prior row for the same pattern; counts are
/// last-write-wins, never accumulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStat {
    pub pattern: String,
    pub count: u64,
    /// Drawing the count was computed against.
    pub drawing: String,
}

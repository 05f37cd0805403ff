//! In-memory implementation of [`LiveDocument`].
//!
//! Behaves like a small host drawing: entities with colors and optional
//! handles, document-global named selection sets, a layer table, and a
//! record of the last viewport zoom. Used by the engine tests and for
//! offline operation. Handle resolution is a fresh scan on every call, so
//! removing an entity makes its handle stale exactly like in the host.

use std::collections::HashMap;

use cadlink_types::{ColorCode, EntityProperties};

use crate::{DocumentError, DocumentResult, EntityRef, LayerInfo, LiveDocument, LiveEntity};

/// Host default color ("ByLayer").
const DEFAULT_COLOR: ColorCode = 256;

#[derive(Debug, Clone)]
struct Slot {
    id: u64,
    handle: Option<String>,
    entity_type: String,
    layer: String,
    color: ColorCode,
    properties: EntityProperties,
    /// Simulates an entity whose property read fails at the host boundary.
    poisoned: bool,
}

/// An in-memory drawing.
#[derive(Debug)]
pub struct MemoryDocument {
    name: String,
    open: bool,
    next_id: u64,
    entities: Vec<Slot>,
    selections: HashMap<String, Vec<EntityRef>>,
    layers: Vec<LayerInfo>,
    zoomed_to: Option<String>,
}

impl MemoryDocument {
    /// Creates an open, empty drawing with the default layer `0`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: true,
            next_id: 0,
            entities: Vec::new(),
            selections: HashMap::new(),
            layers: vec![LayerInfo {
                name: "0".to_string(),
                color: 7,
                is_on: true,
                is_frozen: false,
                is_locked: false,
            }],
            zoomed_to: None,
        }
    }

    fn push(
        &mut self,
        handle: Option<&str>,
        entity_type: &str,
        layer: &str,
        properties: EntityProperties,
        poisoned: bool,
    ) -> EntityRef {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Slot {
            id,
            handle: handle.map(str::to_string),
            entity_type: entity_type.to_string(),
            layer: layer.to_string(),
            color: DEFAULT_COLOR,
            properties,
            poisoned,
        });
        EntityRef(id)
    }

    pub fn add_line(
        &mut self,
        handle: Option<&str>,
        layer: &str,
        start: [f64; 3],
        end: [f64; 3],
    ) -> EntityRef {
        let props = EntityProperties::Line {
            start_point: start,
            end_point: end,
        };
        self.push(handle, "AcDbLine", layer, props, false)
    }

    pub fn add_circle(
        &mut self,
        handle: Option<&str>,
        layer: &str,
        center: [f64; 3],
        radius: f64,
    ) -> EntityRef {
        let props = EntityProperties::Circle { center, radius };
        self.push(handle, "AcDbCircle", layer, props, false)
    }

    pub fn add_text(&mut self, handle: Option<&str>, layer: &str, text: &str) -> EntityRef {
        self.add_text_at(handle, layer, text, None)
    }

    pub fn add_text_at(
        &mut self,
        handle: Option<&str>,
        layer: &str,
        text: &str,
        position: Option<[f64; 3]>,
    ) -> EntityRef {
        let props = EntityProperties::Text {
            text: text.to_string(),
            position,
            height: None,
        };
        self.push(handle, "AcDbText", layer, props, false)
    }

    /// Adds an entity of an unmodeled type carrying an arbitrary bag.
    pub fn add_custom(
        &mut self,
        handle: Option<&str>,
        entity_type: &str,
        layer: &str,
        bag: serde_json::Value,
    ) -> EntityRef {
        self.push(handle, entity_type, layer, EntityProperties::Other(bag), false)
    }

    /// Adds an entity whose property read fails.
    pub fn add_unreadable(&mut self, handle: Option<&str>) -> EntityRef {
        self.push(handle, "AcDbLine", "0", EntityProperties::empty(), true)
    }

    /// Defines a layer in the document's layer table.
    pub fn define_layer(&mut self, name: &str, color: ColorCode) {
        self.layers.push(LayerInfo {
            name: name.to_string(),
            color,
            is_on: true,
            is_frozen: false,
            is_locked: false,
        });
    }

    /// Removes an entity, making its handle stale. Returns whether an
    /// entity was removed.
    pub fn remove_by_handle(&mut self, handle: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|s| s.handle.as_deref() != Some(handle));
        self.entities.len() != before
    }

    /// Closes the drawing; every subsequent operation fails `NotOpen`.
    pub fn close(&mut self) {
        self.open = false;
    }

    // ── Test inspection ──────────────────────────────────────────

    /// Current color of the entity with this handle.
    pub fn color_of(&self, handle: &str) -> Option<ColorCode> {
        self.entities
            .iter()
            .find(|s| s.handle.as_deref() == Some(handle))
            .map(|s| s.color)
    }

    /// Members of a named selection set, if it exists.
    pub fn selection(&self, name: &str) -> Option<&[EntityRef]> {
        self.selections.get(name).map(Vec::as_slice)
    }

    /// Names of all live selection sets.
    pub fn selection_names(&self) -> Vec<String> {
        self.selections.keys().cloned().collect()
    }

    /// Selection set the viewport was last framed around.
    pub fn zoomed_to(&self) -> Option<&str> {
        self.zoomed_to.as_deref()
    }

    fn slot(&self, entity: EntityRef) -> DocumentResult<&Slot> {
        self.entities
            .iter()
            .find(|s| s.id == entity.0)
            .ok_or(DocumentError::EntityGone(entity))
    }

    fn guard_open(&self) -> DocumentResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(DocumentError::NotOpen)
        }
    }
}

impl LiveDocument for MemoryDocument {
    fn is_open(&self) -> bool {
        self.open
    }

    fn name(&self) -> DocumentResult<String> {
        self.guard_open()?;
        Ok(self.name.clone())
    }

    fn entities(&self) -> DocumentResult<Vec<EntityRef>> {
        self.guard_open()?;
        Ok(self.entities.iter().map(|s| EntityRef(s.id)).collect())
    }

    fn read_entity(&self, entity: EntityRef) -> DocumentResult<LiveEntity> {
        self.guard_open()?;
        let slot = self.slot(entity)?;
        if slot.poisoned {
            return Err(DocumentError::ReadFailed {
                entity,
                reason: "property access failed".to_string(),
            });
        }
        Ok(LiveEntity {
            handle: slot.handle.clone(),
            entity_type: slot.entity_type.clone(),
            layer: slot.layer.clone(),
            properties: slot.properties.clone(),
        })
    }

    fn set_color(&mut self, entity: EntityRef, color: ColorCode) -> DocumentResult<ColorCode> {
        self.guard_open()?;
        let slot = self
            .entities
            .iter_mut()
            .find(|s| s.id == entity.0)
            .ok_or(DocumentError::EntityGone(entity))?;
        let previous = slot.color;
        slot.color = color;
        Ok(previous)
    }

    fn create_selection(&mut self, name: &str) -> DocumentResult<()> {
        self.guard_open()?;
        if self.selections.contains_key(name) {
            return Err(DocumentError::SelectionExists(name.to_string()));
        }
        self.selections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    fn delete_selection(&mut self, name: &str) -> DocumentResult<()> {
        self.guard_open()?;
        if self.zoomed_to.as_deref() == Some(name) {
            self.zoomed_to = None;
        }
        self.selections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DocumentError::SelectionNotFound(name.to_string()))
    }

    fn add_to_selection(&mut self, name: &str, entity: EntityRef) -> DocumentResult<()> {
        self.guard_open()?;
        self.slot(entity)?;
        self.selections
            .get_mut(name)
            .ok_or_else(|| DocumentError::SelectionNotFound(name.to_string()))?
            .push(entity);
        Ok(())
    }

    fn select_by_handle(
        &mut self,
        name: &str,
        handle: &str,
    ) -> DocumentResult<Option<EntityRef>> {
        self.guard_open()?;
        if !self.selections.contains_key(name) {
            return Err(DocumentError::SelectionNotFound(name.to_string()));
        }
        // Fresh scan; no cached resolution survives document mutation.
        let found = self
            .entities
            .iter()
            .find(|s| s.handle.as_deref() == Some(handle))
            .map(|s| EntityRef(s.id));
        if let Some(entity) = found {
            if let Some(members) = self.selections.get_mut(name) {
                members.push(entity);
            }
        }
        Ok(found)
    }

    fn zoom_to_selection(&mut self, name: &str) -> DocumentResult<()> {
        self.guard_open()?;
        if !self.selections.contains_key(name) {
            return Err(DocumentError::SelectionNotFound(name.to_string()));
        }
        self.zoomed_to = Some(name.to_string());
        Ok(())
    }

    fn layers(&self) -> DocumentResult<Vec<LayerInfo>> {
        self.guard_open()?;
        Ok(self.layers.clone())
    }
}

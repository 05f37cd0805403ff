//! Full rescan of the live drawing into the snapshot store.

use std::collections::BTreeMap;

use tracing::{info, warn};

use cadlink_document::LiveDocument;
use cadlink_store::SnapshotStore;
use cadlink_types::EntityRecord;

use crate::{EngineError, EngineResult};

/// Outcome of one synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Entities successfully captured into the store.
    pub captured: usize,
    /// Entities skipped because their properties could not be read.
    pub skipped: usize,
    /// Captured entities per full host type tag.
    pub types: BTreeMap<String, u64>,
}

/// Rebuilds the snapshot store from the current drawing.
///
/// Enumerates model space, reads each entity's type-dependent property bag,
/// and replaces the store's entire record population in one transaction —
/// so a rescan of an unchanged drawing is idempotent, and rows for entities
/// no longer present are dropped.
///
/// A single unreadable entity is logged and skipped, never fatal. An
/// unavailable document fails the whole call.
pub fn scan_drawing(
    doc: &dyn LiveDocument,
    store: &mut SnapshotStore,
) -> EngineResult<SyncReport> {
    if !doc.is_open() {
        return Err(EngineError::DocumentUnavailable);
    }

    let mut records = Vec::new();
    let mut types: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0usize;

    for entity in doc.entities()? {
        let live = match doc.read_entity(entity) {
            Ok(live) => live,
            Err(err) => {
                warn!(%entity, %err, "skipping unreadable entity");
                skipped += 1;
                continue;
            }
        };
        *types.entry(live.entity_type.clone()).or_insert(0) += 1;
        records.push(EntityRecord::new(
            live.handle,
            live.entity_type,
            live.layer,
            live.properties,
        ));
    }

    let captured = records.len();
    store.replace_all(&records)?;
    info!(captured, skipped, "drawing synchronized into snapshot store");

    Ok(SyncReport {
        captured,
        skipped,
        types,
    })
}

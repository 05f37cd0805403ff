//! Shared fixtures for engine tests.

#![allow(dead_code)]

use cadlink_document::MemoryDocument;
use cadlink_store::SnapshotStore;

/// A small drawing with geometry and a few labeled text entities.
pub fn sample_drawing() -> MemoryDocument {
    let mut doc = MemoryDocument::new("plant.dwg");
    doc.add_line(Some("L1"), "0", [0.0; 3], [10.0, 0.0, 0.0]);
    doc.add_line(Some("L2"), "0", [0.0; 3], [0.0, 10.0, 0.0]);
    doc.add_circle(Some("C1"), "equipment", [5.0, 5.0, 0.0], 2.0);
    doc.add_text(Some("T1"), "notes", "PMC-3M feeder");
    doc.add_text(Some("T2"), "notes", "spare PMC-3M unit");
    doc.add_text(Some("T3"), "notes", "unrelated label");
    doc
}

/// Fresh in-memory store pre-populated from the given drawing.
pub fn scanned_store(doc: &MemoryDocument) -> SnapshotStore {
    let mut store = SnapshotStore::open_in_memory().unwrap();
    cadlink_engine::scan_drawing(doc, &mut store).unwrap();
    store
}

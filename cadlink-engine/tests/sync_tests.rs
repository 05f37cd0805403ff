mod common;

use cadlink_document::MemoryDocument;
use cadlink_engine::{scan_drawing, EngineError};
use cadlink_store::SnapshotStore;
use pretty_assertions::assert_eq;

use common::sample_drawing;

#[test]
fn scan_captures_all_entities_with_histogram() {
    let doc = sample_drawing();
    let mut store = SnapshotStore::open_in_memory().unwrap();

    let report = scan_drawing(&doc, &mut store).unwrap();
    assert_eq!(report.captured, 6);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.types["AcDbLine"], 2);
    assert_eq!(report.types["AcDbCircle"], 1);
    assert_eq!(report.types["AcDbText"], 3);

    let records = store.records().unwrap();
    assert_eq!(records.len(), 6);
    let text = records
        .iter()
        .find(|r| r.handle.as_deref() == Some("T1"))
        .unwrap();
    assert_eq!(text.name, "Text");
    assert_eq!(text.layer, "notes");
    assert_eq!(text.properties.text(), Some("PMC-3M feeder"));
}

#[test]
fn empty_drawing_scans_to_empty_snapshot() {
    let doc = MemoryDocument::new("empty.dwg");
    let mut store = SnapshotStore::open_in_memory().unwrap();

    let report = scan_drawing(&doc, &mut store).unwrap();
    assert_eq!(report.captured, 0);
    assert!(report.types.is_empty());
    assert!(store.records().unwrap().is_empty());
}

#[test]
fn rescan_is_idempotent() {
    let doc = sample_drawing();
    let mut store = SnapshotStore::open_in_memory().unwrap();

    let first = scan_drawing(&doc, &mut store).unwrap();
    let records_first = store.records().unwrap();
    let second = scan_drawing(&doc, &mut store).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.records().unwrap(), records_first);
}

#[test]
fn rescan_drops_rows_for_removed_entities() {
    let mut doc = sample_drawing();
    let mut store = SnapshotStore::open_in_memory().unwrap();
    scan_drawing(&doc, &mut store).unwrap();

    doc.remove_by_handle("C1");
    scan_drawing(&doc, &mut store).unwrap();

    let records = store.records().unwrap();
    assert_eq!(records.len(), 5);
    assert!(!records.iter().any(|r| r.handle.as_deref() == Some("C1")));
}

#[test]
fn no_two_records_share_a_handle() {
    let mut doc = sample_drawing();
    // Host handles are unique in practice; the store enforces it anyway.
    doc.add_text(Some("T1"), "notes", "duplicate handle");
    let mut store = SnapshotStore::open_in_memory().unwrap();
    scan_drawing(&doc, &mut store).unwrap();

    let handles: Vec<_> = store
        .records()
        .unwrap()
        .into_iter()
        .filter_map(|r| r.handle)
        .collect();
    let mut deduped = handles.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(handles.len(), deduped.len());
}

#[test]
fn unreadable_entity_is_skipped_not_fatal() {
    let mut doc = sample_drawing();
    doc.add_unreadable(Some("X1"));
    let mut store = SnapshotStore::open_in_memory().unwrap();

    let report = scan_drawing(&doc, &mut store).unwrap();
    assert_eq!(report.captured, 6);
    assert_eq!(report.skipped, 1);
}

#[test]
fn handleless_entity_is_captured() {
    let mut doc = MemoryDocument::new("d.dwg");
    doc.add_text(None, "0", "floating note");
    let mut store = SnapshotStore::open_in_memory().unwrap();

    let report = scan_drawing(&doc, &mut store).unwrap();
    assert_eq!(report.captured, 1);
    assert_eq!(store.records().unwrap()[0].handle, None);
}

#[test]
fn closed_document_is_fatal() {
    let mut doc = sample_drawing();
    doc.close();
    let mut store = SnapshotStore::open_in_memory().unwrap();
    assert!(matches!(
        scan_drawing(&doc, &mut store),
        Err(EngineError::DocumentUnavailable)
    ));
}

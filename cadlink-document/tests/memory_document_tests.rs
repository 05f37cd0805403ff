use cadlink_document::{DocumentError, LiveDocument, MemoryDocument};
use cadlink_types::EntityProperties;
use pretty_assertions::assert_eq;

fn small_drawing() -> MemoryDocument {
    let mut doc = MemoryDocument::new("plant.dwg");
    doc.add_line(Some("L1"), "0", [0.0; 3], [10.0, 0.0, 0.0]);
    doc.add_circle(Some("C1"), "equipment", [5.0, 5.0, 0.0], 2.0);
    doc.add_text(Some("T1"), "notes", "PMC-3M feeder");
    doc
}

// ── Enumeration & reads ──────────────────────────────────────────

#[test]
fn enumeration_is_restartable() {
    let doc = small_drawing();
    assert_eq!(doc.entities().unwrap(), doc.entities().unwrap());
    assert_eq!(doc.entities().unwrap().len(), 3);
}

#[test]
fn enumeration_reflects_removal() {
    let mut doc = small_drawing();
    assert!(doc.remove_by_handle("C1"));
    assert_eq!(doc.entities().unwrap().len(), 2);
    assert!(!doc.remove_by_handle("C1"));
}

#[test]
fn read_entity_returns_typed_bag() {
    let doc = small_drawing();
    let refs = doc.entities().unwrap();
    let text = doc.read_entity(refs[2]).unwrap();
    assert_eq!(text.handle.as_deref(), Some("T1"));
    assert_eq!(text.entity_type, "AcDbText");
    assert_eq!(text.layer, "notes");
    assert_eq!(text.properties.text(), Some("PMC-3M feeder"));
}

#[test]
fn poisoned_entity_fails_per_entity() {
    let mut doc = small_drawing();
    let bad = doc.add_unreadable(Some("X1"));
    assert!(matches!(
        doc.read_entity(bad),
        Err(DocumentError::ReadFailed { .. })
    ));
    // Other entities still read fine.
    let refs = doc.entities().unwrap();
    assert!(doc.read_entity(refs[0]).is_ok());
}

#[test]
fn stale_ref_is_gone() {
    let mut doc = small_drawing();
    let refs = doc.entities().unwrap();
    doc.remove_by_handle("L1");
    assert!(matches!(
        doc.read_entity(refs[0]),
        Err(DocumentError::EntityGone(_))
    ));
}

// ── Color mutation ───────────────────────────────────────────────

#[test]
fn set_color_returns_previous() {
    let mut doc = small_drawing();
    let refs = doc.entities().unwrap();
    let previous = doc.set_color(refs[0], 1).unwrap();
    assert_eq!(previous, 256); // ByLayer default
    assert_eq!(doc.set_color(refs[0], 3).unwrap(), 1);
    assert_eq!(doc.color_of("L1"), Some(3));
}

// ── Selection sets ───────────────────────────────────────────────

#[test]
fn selection_lifecycle() {
    let mut doc = small_drawing();
    doc.create_selection("ss").unwrap();
    assert!(matches!(
        doc.create_selection("ss"),
        Err(DocumentError::SelectionExists(_))
    ));

    let refs = doc.entities().unwrap();
    doc.add_to_selection("ss", refs[0]).unwrap();
    assert_eq!(doc.selection("ss").unwrap().len(), 1);

    doc.delete_selection("ss").unwrap();
    assert!(matches!(
        doc.delete_selection("ss"),
        Err(DocumentError::SelectionNotFound(_))
    ));
}

#[test]
fn select_by_handle_is_a_fresh_lookup() {
    let mut doc = small_drawing();
    doc.create_selection("ss").unwrap();

    let found = doc.select_by_handle("ss", "C1").unwrap();
    assert!(found.is_some());
    assert_eq!(doc.selection("ss").unwrap().len(), 1);

    doc.remove_by_handle("C1");
    assert_eq!(doc.select_by_handle("ss", "C1").unwrap(), None);
}

#[test]
fn zoom_requires_existing_selection() {
    let mut doc = small_drawing();
    assert!(matches!(
        doc.zoom_to_selection("missing"),
        Err(DocumentError::SelectionNotFound(_))
    ));
    doc.create_selection("ss").unwrap();
    doc.zoom_to_selection("ss").unwrap();
    assert_eq!(doc.zoomed_to(), Some("ss"));
}

// ── Document state ───────────────────────────────────────────────

#[test]
fn closed_document_refuses_everything() {
    let mut doc = small_drawing();
    doc.close();
    assert!(!doc.is_open());
    assert!(matches!(doc.name(), Err(DocumentError::NotOpen)));
    assert!(matches!(doc.entities(), Err(DocumentError::NotOpen)));
    assert!(matches!(
        doc.create_selection("ss"),
        Err(DocumentError::NotOpen)
    ));
}

#[test]
fn layer_table_lists_defined_layers() {
    let mut doc = small_drawing();
    doc.define_layer("wiring", 4);
    let layers = doc.layers().unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[1].name, "wiring");
    assert_eq!(layers[1].color, 4);
    assert!(layers[1].is_on);
}

#[test]
fn custom_entities_carry_arbitrary_bags() {
    let mut doc = MemoryDocument::new("devices.dwg");
    let dev = doc.add_custom(
        Some("D1"),
        "CustomDevice",
        "devices",
        serde_json::json!({"label": "P14", "position": [40.0, 25.0, 0.0]}),
    );
    let live = doc.read_entity(dev).unwrap();
    assert_eq!(live.entity_type, "CustomDevice");
    match live.properties {
        EntityProperties::Other(value) => assert_eq!(value["label"], "P14"),
        other => panic!("expected Other, got {other:?}"),
    }
}

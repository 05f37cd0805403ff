use cadlink_types::{EntityProperties, EntityRecord};
use pretty_assertions::assert_eq;

#[test]
fn name_strips_host_prefix() {
    let rec = EntityRecord::new(
        Some("2A".to_string()),
        "AcDbCircle",
        "0",
        EntityProperties::empty(),
    );
    assert_eq!(rec.name, "Circle");
    assert_eq!(rec.entity_type, "AcDbCircle");
}

#[test]
fn unprefixed_type_kept_verbatim() {
    let rec = EntityRecord::new(None, "CustomDevice", "devices", EntityProperties::empty());
    assert_eq!(rec.name, "CustomDevice");
    assert_eq!(rec.entity_type, "CustomDevice");
    assert_eq!(rec.handle, None);
}

use jsondb_core::{DirBatch, Document, JsonDb, Kind, Mode};
use jsondb_flat_store::InMemoryFlatStore;
use serde_json::json;

fn db() -> JsonDb<InMemoryFlatStore> {
    JsonDb::new("root", Mode::WR, InMemoryFlatStore::new())
}

#[test]
fn deleting_leaves_one_by_one() {
    let mut db = db();
    db.put_json("a", &json!({"x": 1, "y": [10, 20]})).unwrap();
    assert_eq!(db.get("a").unwrap(), Document::from(json!({"x": 1, "y": [10, 20]})));

    db.del("a\\x").unwrap();
    assert_eq!(db.get("a").unwrap(), Document::from(json!({"y": [10, 20]})));

    db.del("a\\y").unwrap();
    assert_eq!(db.get("a").unwrap(), Document::Null);
    assert_eq!(db.kind_of("a").unwrap(), Kind::Null);
}

#[test]
fn deleting_array_elements_keeps_the_rest_in_order() {
    let mut db = db();
    db.put_json("list", &json!(["a", "b", "c"])).unwrap();

    db.del("list\\[1]").unwrap();

    assert_eq!(db.get("list").unwrap(), Document::from(json!(["a", "c"])));
}

#[test]
fn cascade_climbs_through_every_emptied_ancestor() {
    let mut db = db();
    db.put_json("keep", &json!(true)).unwrap();
    db.put_json("deep", &json!({"a": {"b": {"c": 1}}})).unwrap();

    db.del("deep\\a\\b\\c").unwrap();

    for gone in ["root\\deep\\a\\b", "root\\deep\\a", "root\\deep"] {
        assert!(!db.store().contains_key(gone), "{} should be gone", gone);
        assert!(!db.store().contains_key(&format!("TYPE:{}", gone)));
    }
    assert_eq!(db.root().unwrap(), Document::from(json!({"keep": true})));
}

#[test]
fn cascade_removes_namespace_root_when_it_empties() {
    let mut db = db();
    db.put_json("only", &json!({"leaf": 1})).unwrap();

    db.del("only\\leaf").unwrap();

    assert!(db.store().is_empty());
    assert_eq!(db.root().unwrap(), Document::Null);
}

#[test]
fn cascade_stops_at_first_non_empty_ancestor() {
    let mut db = db();
    db.put_json("a", &json!({"b": {"c": 1}, "d": 2})).unwrap();

    db.del("a\\b\\c").unwrap();

    assert!(!db.store().contains_key("root\\a\\b"));
    assert_eq!(db.get("a").unwrap(), Document::from(json!({"d": 2})));
    assert_eq!(db.kind_of("a").unwrap(), Kind::Dir);
}

#[test]
fn deleting_a_directory_is_shallow() {
    let mut db = db();
    db.put_json("a", &json!({"b": {"c": 1}, "d": 2})).unwrap();

    db.del("a\\b").unwrap();

    assert_eq!(db.get("a").unwrap(), Document::from(json!({"d": 2})));
    // The child entry is unlisted but still physically present.
    assert!(db.store().contains_key("root\\a\\b\\c"));
    assert_eq!(db.get("a\\b\\c").unwrap(), Document::from(1i64));
}

#[test]
fn deleting_missing_path_changes_nothing() {
    let mut db = db();
    db.put_json("a", &json!({"x": 1})).unwrap();
    let before = db.store().entries().clone();

    db.del("nope").unwrap();
    db.del("a\\nope").unwrap();
    db.del("nope\\deeper\\still").unwrap();

    assert_eq!(db.store().entries(), &before);
}

#[test]
fn clear_removes_only_the_namespace_header() {
    let mut db = db();
    db.put_json("a", &json!({"x": 1})).unwrap();
    db.put_json("b", &json!([1, 2])).unwrap();

    db.clear().unwrap();

    assert_eq!(db.root().unwrap(), Document::Null);
    assert!(!db.store().contains_key("root"));
    assert!(!db.store().contains_key("TYPE:root"));
    for still_there in ["root\\a", "root\\a\\x", "root\\b", "root\\b\\[0]", "root\\b\\[1]"] {
        assert!(db.store().contains_key(still_there), "{} should remain", still_there);
    }
}

#[test]
fn registering_twice_keeps_child_count() {
    let mut store = InMemoryFlatStore::new();
    let mut batch = DirBatch::new();

    batch.register(&mut store, "root", "root\\a").unwrap();
    batch.register(&mut store, "root", "root\\b").unwrap();
    batch.register(&mut store, "root", "root\\a").unwrap();

    assert_eq!(batch.children("root").map(<[String]>::len), Some(2));
}

#[test]
fn rewriting_after_delete_restores_listing() {
    let mut db = db();
    db.put_json("a", &json!({"x": 1})).unwrap();
    db.del("a\\x").unwrap();
    assert_eq!(db.root().unwrap(), Document::Null);

    db.put_json("a", &json!({"x": 2})).unwrap();
    assert_eq!(db.root().unwrap(), Document::from(json!({"a": {"x": 2}})));
}

//! Document reads and mutations.

use crate::common::*;
use jsondocs::KeyPath;

#[test]
fn init_then_get_round_trips() {
    let t = TestRoot::new();
    let doc: JsonValue = json!({
        "s": "text",
        "n": 1.5,
        "i": -3,
        "b": false,
        "z": null,
        "arr": [1, {"x": [true]}],
        "obj": {"deep": {"er": "est"}}
    })
    .into();

    t.store.init_document("data/doc.json", &doc).unwrap();
    assert_eq!(t.store.get_document("data/doc.json").unwrap(), doc);
}

#[test]
fn init_overwrites_unconditionally() {
    let t = TestRoot::new();
    t.write_raw("a.json", "not even json");
    t.store.init_document("a.json", &json!({"fresh": true}).into()).unwrap();
    assert_eq!(
        t.store.get_document("a.json").unwrap().as_inner(),
        &json!({"fresh": true})
    );
}

#[test]
fn get_missing_document_is_not_found() {
    let t = TestRoot::new();
    assert!(t.store.get_document("nope.json").unwrap_err().is_not_found());
}

#[test]
fn get_malformed_document_is_parse_error() {
    let t = TestRoot::new();
    t.write_raw("bad.json", "{\"a\": ");
    assert!(matches!(
        t.store.get_document("bad.json"),
        Err(jsondocs_core::Error::Parse { .. })
    ));
}

#[test]
fn merge_update_overwrites_and_adds() {
    let t = TestRoot::new();
    t.store.init_document("m.json", &json!({"a": 1, "b": 2}).into()).unwrap();

    let patch = json!({"b": 20, "c": 30});
    let updated = t
        .store
        .merge_update("m.json", patch.as_object().unwrap())
        .unwrap();

    assert_eq!(updated.as_inner(), &json!({"a": 1, "b": 20, "c": 30}));
    assert_eq!(t.store.get_document("m.json").unwrap(), updated);
}

#[test]
fn merge_update_is_shallow() {
    let t = TestRoot::new();
    t.store
        .init_document("m.json", &json!({"cfg": {"a": 1, "b": 2}}).into())
        .unwrap();
    let patch = json!({"cfg": {"a": 9}});
    let updated = t
        .store
        .merge_update("m.json", patch.as_object().unwrap())
        .unwrap();
    assert_eq!(updated.as_inner(), &json!({"cfg": {"a": 9}}));
}

#[test]
fn restricted_edit_ignores_unknown_fields() {
    let t = TestRoot::new();
    t.store.init_document("e.json", &json!({"a": 1, "b": 2}).into()).unwrap();

    let patch = json!({"b": 3, "c": 4});
    let updated = t
        .store
        .restricted_edit("e.json", patch.as_object().unwrap())
        .unwrap();

    assert_eq!(updated.as_inner(), &json!({"a": 1, "b": 3}));
    assert_eq!(
        t.store.get_document("e.json").unwrap().as_inner(),
        &json!({"a": 1, "b": 3})
    );
}

#[test]
fn increment_adds_exactly_one() {
    let t = TestRoot::new();
    t.store
        .init_document("c.json", &json!({"n": 41, "f": 0.5}).into())
        .unwrap();

    assert_eq!(
        t.store.increment("c.json", "n").unwrap(),
        IncrementOutcome::Incremented {
            field: "n".into(),
            new_value: JsonValue::from(42i64),
        }
    );
    t.store.increment("c.json", "f").unwrap();
    assert_eq!(
        t.store.get_document("c.json").unwrap().as_inner(),
        &json!({"n": 42, "f": 1.5})
    );
}

#[test]
fn increment_noop_leaves_file_byte_identical() {
    let t = TestRoot::new();
    let original = "{\"label\": \"x\",   \"n\": 1}";
    t.write_raw("c.json", original);

    assert_eq!(
        t.store.increment("c.json", "missing").unwrap(),
        IncrementOutcome::NoOp {
            field: "missing".into()
        }
    );
    assert!(t.store.increment("c.json", "label").unwrap().is_noop());
    assert_eq!(t.read_raw("c.json"), original);
}

#[test]
fn increment_overflow_is_an_error() {
    let t = TestRoot::new();
    t.write_raw("c.json", &format!("{{\"n\": {}}}", u64::MAX));
    assert!(matches!(
        t.store.increment("c.json", "n"),
        Err(jsondocs_core::Error::Overflow { .. })
    ));
    assert_eq!(t.read_raw("c.json"), format!("{{\"n\": {}}}", u64::MAX));
}

#[test]
fn increment_float_beyond_precision_is_an_error() {
    let t = TestRoot::new();
    t.write_raw("c.json", "{\"n\": 1e16}");
    assert!(matches!(
        t.store.increment("c.json", "n"),
        Err(jsondocs_core::Error::Overflow { .. })
    ));
    assert_eq!(t.read_raw("c.json"), "{\"n\": 1e16}");

    t.write_raw("f.json", "{\"n\": 0.5}");
    t.store.increment("f.json", "n").unwrap();
    assert_eq!(t.store.get_document("f.json").unwrap()["n"].as_f64(), Some(1.5));
}

#[test]
fn nested_navigation() {
    let t = TestRoot::new();
    t.store
        .init_document("n.json", &json!({"a": {"b": {"c": 7}, "list": [1, 2]}}).into())
        .unwrap();

    let keys: KeyPath = "a.b.c".parse().unwrap();
    assert_eq!(
        t.store.get_nested_value("n.json", &keys).unwrap().as_i64(),
        Some(7)
    );

    let whole = t.store.get_nested_value("n.json", &KeyPath::root()).unwrap();
    assert_eq!(whole, t.store.get_document("n.json").unwrap());

    // No array-index coercion
    let keys: KeyPath = "a.list.0".parse().unwrap();
    match t.store.get_nested_value("n.json", &keys) {
        Err(jsondocs_core::Error::KeyNotFound(e)) => {
            assert_eq!(e.segment, "0");
            assert_eq!(e.depth, 2);
        }
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
}

#[test]
fn pretty_and_compact_output() {
    let pretty = TestRoot::new();
    pretty.store.init_document("p.json", &json!({"a": 1}).into()).unwrap();
    assert_eq!(pretty.read_raw("p.json"), "{\n  \"a\": 1\n}");

    let compact = TestRoot::with_options(OpenOptions::new().pretty(false).sync_writes(false));
    compact.store.init_document("p.json", &json!({"a": 1}).into()).unwrap();
    assert_eq!(compact.read_raw("p.json"), "{\"a\":1}");
}

#[test]
fn size_limit_rejects_write_and_keeps_old_content() {
    let t = TestRoot::with_options(
        OpenOptions::new()
            .pretty(false)
            .max_document_bytes(64)
            .sync_writes(false),
    );
    t.store.init_document("s.json", &json!({"a": 1}).into()).unwrap();

    let patch = json!({"big": "y".repeat(100)});
    assert!(matches!(
        t.store.merge_update("s.json", patch.as_object().unwrap()),
        Err(jsondocs_core::Error::LimitExceeded(_))
    ));
    assert_eq!(t.read_raw("s.json"), "{\"a\":1}");
}

#[test]
fn no_temp_files_left_behind() {
    let t = TestRoot::new();
    t.store.init_document("d/a.json", &json!({"n": 0}).into()).unwrap();
    for _ in 0..5 {
        t.store.increment("d/a.json", "n").unwrap();
    }
    assert_eq!(tree_listing(t.root()), vec![".jsondocs.lock", "d", "d/a.json"]);
}

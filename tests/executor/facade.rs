//! The typed JsonDocs API.

use crate::common::*;

#[test]
fn open_creates_root_and_operates() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("docs");
    let docs = JsonDocs::open_with(&root, OpenOptions::new().sync_writes(false)).unwrap();
    assert!(root.is_dir());
    assert_eq!(docs.access_mode(), AccessMode::ReadWrite);

    docs.init_document("u.json", json!({"name": "x", "n": 1})).unwrap();
    assert_eq!(
        docs.get_document("u.json").unwrap(),
        JsonValue::from(json!({"name": "x", "n": 1}))
    );
    assert_eq!(
        docs.increment("u.json", "n").unwrap(),
        IncrementOutcome::Incremented {
            field: "n".into(),
            new_value: json!(2).into(),
        }
    );
    assert!(docs.increment("u.json", "missing").unwrap().is_noop());
}

#[test]
fn nested_key_strings() {
    let t = TestRoot::new();
    let docs = t.docs();
    docs.init_document("d.json", json!({"a": {"b": {"c": "deep"}}}))
        .unwrap();

    assert_eq!(
        docs.get_nested_value("d.json", "a.b.c").unwrap(),
        JsonValue::from(json!("deep"))
    );
    assert_eq!(
        docs.get_nested_value("d.json", "").unwrap(),
        docs.get_document("d.json").unwrap()
    );
    assert!(matches!(
        docs.get_nested_value("d.json", "a..c"),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        docs.get_nested_value("d.json", "a.x"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn merge_and_restricted_edit_return_the_written_document() {
    let t = TestRoot::new();
    let docs = t.docs();
    docs.init_document("p.json", json!({"a": 1, "b": 2})).unwrap();

    let merged = docs.merge_update("p.json", json!({"b": 3, "c": 4})).unwrap();
    assert_eq!(merged, JsonValue::from(json!({"a": 1, "b": 3, "c": 4})));

    let edited = docs
        .restricted_edit("p.json", json!({"a": 10, "z": 0}))
        .unwrap();
    assert_eq!(edited, JsonValue::from(json!({"a": 10, "b": 3, "c": 4})));
    assert_eq!(docs.get_document("p.json").unwrap(), edited);
}

#[test]
fn tree_operations() {
    let t = TestRoot::new();
    let docs = t.docs();
    docs.create_folder("x/y").unwrap();
    docs.init_document("x/y/f.json", json!({})).unwrap();

    let stats = docs.copy_item("x/y/f.json", "g.json", false).unwrap();
    assert_eq!(stats.files, 1);
    assert!(t.abs("g.json").is_file());

    let names: Vec<_> = docs
        .list_directory("")
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["g.json", "x"]);

    docs.delete_item("g.json", false).unwrap();
    assert!(matches!(
        docs.delete_item("g.json", false),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn facade_and_executor_share_the_store() {
    let t = TestRoot::new();
    let docs = t.docs();
    docs.init_document("s.json", json!({"n": 5})).unwrap();

    let out = docs
        .executor()
        .execute(Command::GetDocument {
            path: "s.json".into(),
        })
        .unwrap();
    assert_eq!(out, Output::Document(json!({"n": 5}).into()));
    assert_eq!(docs.root(), t.root());
}

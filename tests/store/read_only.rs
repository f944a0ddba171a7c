//! Read-only access mode and the cross-process root lock.

use crate::common::*;
use jsondocs_core::Error as StoreError;

#[test]
fn read_only_store_serves_reads_and_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    {
        let rw = Store::open(dir.path()).unwrap();
        rw.init_document("a.json", &json!({"n": 1}).into()).unwrap();
    }

    let ro = Store::open_with(
        dir.path(),
        OpenOptions::new().access_mode(AccessMode::ReadOnly),
    )
    .unwrap();

    assert_eq!(ro.get_document("a.json").unwrap().as_inner(), &json!({"n": 1}));
    assert!(matches!(ro.increment("a.json", "n"), Err(StoreError::ReadOnly)));
    assert!(matches!(
        ro.init_document("b.json", &json!({}).into()),
        Err(StoreError::ReadOnly)
    ));
    assert!(matches!(ro.create_folder("d"), Err(StoreError::ReadOnly)));
    assert!(!dir.path().join("b.json").exists());
    assert!(!dir.path().join("d").exists());
}

#[test]
fn read_only_open_does_not_create_anything() {
    let dir = tempfile::tempdir().unwrap();
    let ro = Store::open_with(
        dir.path(),
        OpenOptions::new().access_mode(AccessMode::ReadOnly),
    )
    .unwrap();
    assert!(ro.list_directory("").unwrap().is_empty());
    assert!(tree_listing(dir.path()).is_empty());
}

#[test]
fn read_only_handles_share_the_root() {
    let dir = tempfile::tempdir().unwrap();
    {
        let _rw = Store::open(dir.path()).unwrap();
    }
    let opts = OpenOptions::new().access_mode(AccessMode::ReadOnly);
    let a = Store::open_with(dir.path(), opts.clone()).unwrap();
    let b = Store::open_with(dir.path(), opts).unwrap();
    assert_eq!(a.root(), b.root());
}

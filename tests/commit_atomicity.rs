//! Commit is all-or-nothing, idempotent to repeat, and survives a
//! flaky persistence adapter.

use anyhow::Result;

use CanopyCfg::{
    decode_snapshot, encode_snapshot, metrics, validators, MemSnapshot, PersistError, Persistence,
    Store, StoreError, StoreOptions, Tree, Value,
};

fn tree(json: &str) -> Tree {
    serde_json::from_str(json).expect("test tree json")
}

/// Adapter whose saves always fail (storage quota, pulled disk, ...).
struct FailingSnapshot;

impl Persistence for FailingSnapshot {
    fn load(&mut self) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(None)
    }
    fn save(&mut self, _blob: &[u8]) -> Result<(), PersistError> {
        Err(PersistError::Io(std::io::Error::other("save rejected")))
    }
}

#[test]
fn rejected_batch_leaves_tree_byte_identical() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{"a": {"good": 1, "checked": 10}}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("a.checked", validators::int_range(0, 100))
        .open()?;

    let before = encode_snapshot(store.snapshot_tree(), false)?;

    store.stage_set("a.good", Value::from(2))?; // would pass
    store.stage_set("a.checked", Value::from(1000))?; // rejected

    let err = store.commit().unwrap_err();
    match err {
        StoreError::Validation { path, .. } => assert_eq!(path, "a.checked"),
        other => panic!("expected Validation, got {other:?}"),
    }

    // byte-for-byte equal to the pre-commit state; nothing applied
    let after = encode_snapshot(store.snapshot_tree(), false)?;
    assert_eq!(before, after);
    assert_eq!(store.get("a.good")?, Some(&Value::from(1)));
    assert_eq!(store.revision(), 0);
    assert!(metrics::snapshot().reject_ratio() > 0.0);

    // batch kept for fixup: correct the bad value and retry
    store.stage_set("a.checked", Value::from(50))?;
    store.commit()?;
    assert_eq!(store.get("a.good")?, Some(&Value::from(2)));
    assert_eq!(store.get("a.checked")?, Some(&Value::from(50)));
    Ok(())
}

#[test]
fn commit_saves_once_with_expected_bytes() -> Result<()> {
    // defaults {a:{b:1}}, stage a.b=2, commit
    let mem = MemSnapshot::new();
    let mut store = Store::open(tree(r#"{"a": {"b": 1}}"#), Box::new(mem.clone()));

    assert_eq!(mem.saves(), 0); // open does not save

    store.stage_set("a.b", Value::from(2))?;
    store.commit()?;

    assert_eq!(mem.saves(), 1);
    let blob = mem.blob().expect("snapshot saved");
    assert_eq!(decode_snapshot(&blob)?, tree(r#"{"a": {"b": 2}}"#));
    Ok(())
}

#[test]
fn repeated_commit_writes_identical_content() -> Result<()> {
    let mem = MemSnapshot::new();
    let mut store = Store::open(tree(r#"{"a": {"b": 1}}"#), Box::new(mem.clone()));

    store.stage_set("a.b", Value::from(2))?;
    store.commit()?;
    let first = mem.blob().expect("first save");

    // nothing staged: the second commit is a redundant save, nothing else
    store.commit()?;
    assert_eq!(mem.saves(), 2);
    let second = mem.blob().expect("second save");
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn failed_save_is_non_fatal() -> Result<()> {
    let mut store = Store::open(tree(r#"{"a": {"b": 1}}"#), Box::new(FailingSnapshot));

    let errors_before = metrics::snapshot().snapshot_save_errors;

    store.stage_set("a.b", Value::from(2))?;
    store.commit()?; // save fails, commit still succeeds

    assert_eq!(store.get("a.b")?, Some(&Value::from(2)));
    assert_eq!(store.revision(), 1);
    assert!(
        metrics::snapshot().snapshot_save_errors > errors_before,
        "save error must be counted"
    );

    // explicit flush reports the failure
    assert!(!store.flush());
    Ok(())
}

#[test]
fn save_on_commit_off_batches_saves() -> Result<()> {
    let mem = MemSnapshot::new();
    let mut store = Store::builder()
        .defaults(tree(r#"{"a": {"b": 1}}"#))
        .persistence(Box::new(mem.clone()))
        .options(StoreOptions::default().with_save_on_commit(false))
        .open()?;

    store.stage_set("a.b", Value::from(2))?;
    store.commit()?;
    store.stage_set("a.b", Value::from(3))?;
    store.commit()?;
    assert_eq!(mem.saves(), 0);

    assert!(store.flush());
    assert_eq!(mem.saves(), 1);
    assert_eq!(
        decode_snapshot(&mem.blob().expect("flushed"))?,
        tree(r#"{"a": {"b": 3}}"#)
    );
    Ok(())
}

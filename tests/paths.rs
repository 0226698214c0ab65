//! Path addressing: parse rules, soft NotFound, addressing errors.

use anyhow::Result;

use CanopyCfg::{DottedPath, MemSnapshot, PathPattern, Store, StoreError, Tree, Value};

fn tree(json: &str) -> Tree {
    serde_json::from_str(json).expect("test tree json")
}

fn mem_store(defaults: &str) -> Store {
    Store::open(tree(defaults), Box::new(MemSnapshot::new()))
}

#[test]
fn dotted_path_parse_rules() {
    assert!(DottedPath::parse("a").is_ok());
    assert!(DottedPath::parse("a.b.c").is_ok());
    let p = DottedPath::parse("a.b.c").unwrap();
    assert_eq!(p.segments().len(), 3);
    assert_eq!(p.as_str(), "a.b.c");
    assert_eq!(p.prefix_str(2), "a.b");

    for bad in ["", ".", ".a", "a.", "a..b", "a.*.b", "*"] {
        let err = DottedPath::parse(bad).unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidPath { .. }),
            "{bad:?} should be InvalidPath, got {err:?}"
        );
    }
}

#[test]
fn path_pattern_parse_rules() {
    assert_eq!(PathPattern::parse("*").unwrap(), PathPattern::Global);
    assert!(matches!(
        PathPattern::parse("a.b.*").unwrap(),
        PathPattern::Prefix(_)
    ));
    assert!(matches!(
        PathPattern::parse("a.b.c").unwrap(),
        PathPattern::Exact(_)
    ));
    // '*' only as the terminal segment
    assert!(PathPattern::parse("a.*.b").is_err());
    assert!(PathPattern::parse("*.b").is_err());
    assert!(PathPattern::parse(".*").is_err());
}

#[test]
fn get_soft_not_found() -> Result<()> {
    let store = mem_store(r#"{"a": {"b": 2}}"#);

    // absent key
    assert_eq!(store.get("a.x")?, None);
    // absent prefix
    assert_eq!(store.get("z.b")?, None);
    // descent through a leaf: a.b is 2, not a node
    assert_eq!(store.get("a.b.x")?, None);

    // malformed path is an error, not NotFound
    assert!(matches!(
        store.get("a..b"),
        Err(StoreError::InvalidPath { .. })
    ));
    Ok(())
}

#[test]
fn stage_rejects_descent_through_leaf() -> Result<()> {
    let mut store = mem_store(r#"{"a": {"b": 2}}"#);

    let err = store.stage_set("a.b.c", Value::from(1)).unwrap_err();
    match err {
        StoreError::Addressing { path, prefix } => {
            assert_eq!(path, "a.b.c");
            assert_eq!(prefix, "a.b");
        }
        other => panic!("expected Addressing, got {other:?}"),
    }
    // nothing staged, nothing changed
    assert_eq!(store.staged_len(), 0);
    assert_eq!(store.get("a.b")?, Some(&Value::from(2)));
    Ok(())
}

#[test]
fn cross_staged_addressing_conflict_aborts_commit() -> Result<()> {
    let mut store = mem_store(r#"{"a": {}}"#);

    // "a.b" sorts before "a.b.c", so the leaf lands first in the merge
    store.stage_set("a.b", Value::from(1))?;
    store.stage_set("a.b.c", Value::from(2))?;

    let err = store.commit().unwrap_err();
    assert!(matches!(err, StoreError::Addressing { .. }));

    // whole batch aborted: tree untouched, batch retained for fixup
    assert_eq!(store.get("a.b")?, None);
    assert_eq!(store.staged_len(), 2);
    assert_eq!(store.revision(), 0);
    Ok(())
}

#[test]
fn last_write_wins_within_a_batch() -> Result<()> {
    let mut store = mem_store(r#"{}"#);

    store.stage_set("x.y", Value::from("first"))?;
    store.stage_set("x.y", Value::from("second"))?;
    assert_eq!(store.staged_len(), 1);
    assert_eq!(store.staged_value("x.y"), Some(&Value::from("second")));

    store.commit()?;
    assert_eq!(store.get("x.y")?, Some(&Value::from("second")));
    Ok(())
}

#[test]
fn programmatic_tree_construction() -> Result<()> {
    let mut theme = Tree::new();
    theme.insert("darkMode", Value::from(false));
    theme.insert("primaryColor", Value::from("#640101"));
    let mut defaults = Tree::new();
    defaults.insert("theme", Value::Node(theme));

    let store = Store::open(defaults, Box::new(MemSnapshot::new()));
    assert_eq!(store.get("theme.darkMode")?, Some(&Value::from(false)));
    assert_eq!(
        store.get("theme.primaryColor")?,
        Some(&Value::from("#640101"))
    );

    // typed accessors on values
    let dark = store.get("theme.darkMode")?.expect("present");
    assert_eq!(dark.as_bool(), Some(false));
    assert_eq!(dark.as_i64(), None);
    let color = store.get("theme.primaryColor")?.expect("present");
    assert_eq!(color.as_str(), Some("#640101"));
    Ok(())
}

#[test]
fn discard_staged_abandons_batch() -> Result<()> {
    let mut store = mem_store(r#"{"a": {"b": 1}}"#);

    store.stage_set("a.b", Value::from(7))?;
    store.discard_staged();
    assert_eq!(store.staged_len(), 0);

    store.commit()?; // empty commit is legal
    assert_eq!(store.get("a.b")?, Some(&Value::from(1)));
    Ok(())
}

//! Validator registry: longest-prefix lookup, permissive default,
//! normalization, and the stock constructors.

use std::sync::Arc;

use anyhow::Result;

use CanopyCfg::{validators, MemSnapshot, Scalar, Store, StoreError, Tree, Value};

fn tree(json: &str) -> Tree {
    serde_json::from_str(json).expect("test tree json")
}

/// Validator that stamps every accepted int with a marker value, so the
/// committed tree tells us which pattern matched.
fn stamp(marker: i64) -> CanopyCfg::ValidatorFn {
    Arc::new(move |_v: &Value, _t: &Tree| Ok(Value::from(marker)))
}

#[test]
fn longest_prefix_match_order() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("a.b.c", stamp(1))
        .validator("a.b.*", stamp(2))
        .validator("a.*", stamp(3))
        .validator("*", stamp(4))
        .open()?;

    store.stage_set("a.b.c", Value::from(0))?; // exact
    store.stage_set("a.b.d", Value::from(0))?; // a.b.*
    store.stage_set("a.x", Value::from(0))?; // a.*
    store.stage_set("z.q", Value::from(0))?; // global
    store.commit()?;

    assert_eq!(store.get("a.b.c")?, Some(&Value::from(1)));
    assert_eq!(store.get("a.b.d")?, Some(&Value::from(2)));
    assert_eq!(store.get("a.x")?, Some(&Value::from(3)));
    assert_eq!(store.get("z.q")?, Some(&Value::from(4)));
    Ok(())
}

#[test]
fn prefix_without_exact_covers_siblings() -> Result<()> {
    // a.* and a.b.c registered; a.b.c goes exact, a.b.d falls to a.*
    let mut store = Store::builder()
        .defaults(tree(r#"{}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("a.b.c", stamp(10))
        .validator("a.*", stamp(20))
        .open()?;

    store.stage_set("a.b.c", Value::from(0))?;
    store.stage_set("a.b.d", Value::from(0))?;
    store.commit()?;

    assert_eq!(store.get("a.b.c")?, Some(&Value::from(10)));
    assert_eq!(store.get("a.b.d")?, Some(&Value::from(20)));
    Ok(())
}

#[test]
fn permissive_default_passes_through_unchanged() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("watched.*", validators::bool_only())
        .open()?;

    // nothing registered for this subtree: any value goes in as-is
    store.stage_set("free.anything", Value::from("whatever"))?;
    store.commit()?;
    assert_eq!(store.get("free.anything")?, Some(&Value::from("whatever")));
    Ok(())
}

#[test]
fn validators_see_current_tree_not_working_copy() -> Result<()> {
    // limit must not exceed cap *as currently committed*; a batch that
    // also lowers cap must not affect the limit check
    let cap_check: CanopyCfg::ValidatorFn = Arc::new(|v: &Value, current: &Tree| {
        let cap = current
            .get(&CanopyCfg::DottedPath::parse("pool.cap").unwrap())
            .and_then(|c| c.as_i64())
            .unwrap_or(0);
        match v.as_i64() {
            Some(n) if n <= cap => Ok(v.clone()),
            Some(n) => Err(format!("limit {} exceeds cap {}", n, cap)),
            None => Err("expected int".to_string()),
        }
    });

    let mut store = Store::builder()
        .defaults(tree(r#"{"pool": {"cap": 10, "limit": 4}}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("pool.limit", cap_check)
        .open()?;

    // cap drops to 5 in the same batch; limit 8 validates against the
    // committed cap of 10 and passes
    store.stage_set("pool.cap", Value::from(5))?;
    store.stage_set("pool.limit", Value::from(8))?;
    store.commit()?;

    assert_eq!(store.get("pool.cap")?, Some(&Value::from(5)));
    assert_eq!(store.get("pool.limit")?, Some(&Value::from(8)));
    Ok(())
}

#[test]
fn rejection_names_path_and_reason() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{"u": {"minAge": 16}}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("u.minAge", validators::int_range(13, 100))
        .open()?;

    store.stage_set("u.minAge", Value::from(7))?;
    match store.commit().unwrap_err() {
        StoreError::Validation { path, reason } => {
            assert_eq!(path, "u.minAge");
            assert!(reason.contains("outside"), "reason: {reason}");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(store.get("u.minAge")?, Some(&Value::from(16)));
    Ok(())
}

#[test]
fn clamp_normalizes_instead_of_rejecting() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{"pw": {"minLength": 12}}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("pw.minLength", validators::clamp_int(8, 64))
        .open()?;

    store.stage_set("pw.minLength", Value::from(200))?;
    store.commit()?;
    assert_eq!(store.get("pw.minLength")?, Some(&Value::from(64)));

    store.stage_set("pw.minLength", Value::from(3))?;
    store.commit()?;
    assert_eq!(store.get("pw.minLength")?, Some(&Value::from(8)));
    Ok(())
}

#[test]
fn list_filter_normalizes_members() -> Result<()> {
    let mut store = Store::builder()
        .defaults(tree(r#"{"langs": ["en"]}"#))
        .persistence(Box::new(MemSnapshot::new()))
        .validator("langs", validators::list_subset_of(&["en", "es", "fr"]))
        .open()?;

    store.stage_set(
        "langs",
        Value::List(vec![
            Scalar::Str("en".into()),
            Scalar::Str("tlh".into()), // dropped
            Scalar::Str("fr".into()),
        ]),
    )?;
    store.commit()?;

    assert_eq!(
        store.get("langs")?,
        Some(&Value::List(vec![
            Scalar::Str("en".into()),
            Scalar::Str("fr".into()),
        ]))
    );
    Ok(())
}

#[test]
fn stock_validators_type_errors() -> Result<()> {
    let current = Tree::new();

    let v = validators::int_range(0, 10);
    assert!(v(&Value::from("nope"), &current).is_err());

    let v = validators::str_len(3, 50);
    assert!(v(&Value::from("ok name"), &current).is_ok());
    assert!(v(&Value::from("ab"), &current).is_err());
    assert!(v(&Value::from(5), &current).is_err());

    let v = validators::one_of(&["flat-rate", "regional"]);
    assert!(v(&Value::from("flat-rate"), &current).is_ok());
    assert!(v(&Value::from("other"), &current).is_err());

    let v = validators::bool_only();
    assert!(v(&Value::from(true), &current).is_ok());
    assert!(v(&Value::from(1), &current).is_err());
    Ok(())
}

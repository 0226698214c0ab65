//! Stock validator constructors.
//!
//! These cover the checks a settings UI actually registers: numeric
//! ranges (reject or clamp), string length bounds, enumerated choices,
//! and list filtering against an allow-list. Anything richer is written
//! by the embedder as a closure with the same signature.

use std::sync::Arc;

use crate::registry::ValidatorFn;
use crate::tree::{Scalar, Tree, Value};

/// Accept an integer leaf in `[min, max]`, reject anything else.
pub fn int_range(min: i64, max: i64) -> ValidatorFn {
    Arc::new(move |v: &Value, _t: &Tree| match v.as_i64() {
        Some(n) if (min..=max).contains(&n) => Ok(v.clone()),
        Some(n) => Err(format!("{} outside [{}, {}]", n, min, max)),
        None => Err(format!("expected int, got {}", v.kind())),
    })
}

/// Clamp an integer leaf into `[min, max]` instead of rejecting.
/// Non-integers are still rejected.
pub fn clamp_int(min: i64, max: i64) -> ValidatorFn {
    Arc::new(move |v: &Value, _t: &Tree| match v.as_i64() {
        Some(n) => Ok(Value::from(n.clamp(min, max))),
        None => Err(format!("expected int, got {}", v.kind())),
    })
}

/// Accept a string leaf whose character count is in `[min, max]`.
pub fn str_len(min: usize, max: usize) -> ValidatorFn {
    Arc::new(move |v: &Value, _t: &Tree| match v.as_str() {
        Some(s) => {
            let n = s.chars().count();
            if (min..=max).contains(&n) {
                Ok(v.clone())
            } else {
                Err(format!("length {} outside [{}, {}]", n, min, max))
            }
        }
        None => Err(format!("expected string, got {}", v.kind())),
    })
}

/// Accept a string leaf equal to one of `allowed`.
pub fn one_of(allowed: &[&str]) -> ValidatorFn {
    let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
    Arc::new(move |v: &Value, _t: &Tree| match v.as_str() {
        Some(s) if allowed.iter().any(|a| a == s) => Ok(v.clone()),
        Some(s) => Err(format!("{:?} not in {:?}", s, allowed)),
        None => Err(format!("expected string, got {}", v.kind())),
    })
}

/// Normalize a list of strings by dropping members outside `allowed`.
/// Non-string members are rejected, not dropped.
pub fn list_subset_of(allowed: &[&str]) -> ValidatorFn {
    let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
    Arc::new(move |v: &Value, _t: &Tree| match v.as_list() {
        Some(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Scalar::Str(s) => {
                        if allowed.iter().any(|a| a == s) {
                            kept.push(Scalar::Str(s.clone()));
                        }
                    }
                    other => return Err(format!("expected string item, got {}", other.kind())),
                }
            }
            Ok(Value::List(kept))
        }
        None => Err(format!("expected list, got {}", v.kind())),
    })
}

/// Accept only a boolean leaf.
pub fn bool_only() -> ValidatorFn {
    Arc::new(move |v: &Value, _t: &Tree| match v {
        Value::Leaf(Scalar::Bool(_)) => Ok(v.clone()),
        other => Err(format!("expected bool, got {}", other.kind())),
    })
}

//! The config tree: ordered nested mapping of string keys to scalars,
//! lists of scalars, or subtrees.
//!
//! Serde forms are untagged, so the JSON encoding is the natural one:
//! objects for nodes, arrays for lists, plain scalars for leaves.
//! `Null` is a scalar in its own right (default trees routinely carry
//! "not configured" leaves such as a logo URL).
//!
//! The tree is a pure tree (no cycles, no sharing); the store hands out
//! `&Tree`/`&Value` views or structural clones, never shared mutable
//! state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::path::DottedPath;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Leaf(Scalar),
    List(Vec<Scalar>),
    Node(Tree),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Leaf(s) => s.kind(),
            Value::List(_) => "list",
            Value::Node(_) => "node",
        }
    }

    pub fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            Value::Leaf(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Leaf(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Leaf(Scalar::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Leaf(Scalar::Float(x)) => Some(*x),
            Value::Leaf(Scalar::Int(n)) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Tree> {
        match self {
            Value::Node(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Leaf(Scalar::Bool(b))
    }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Leaf(Scalar::Int(n))
    }
}
impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Leaf(Scalar::Float(x))
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Leaf(Scalar::Str(s.to_string()))
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Leaf(Scalar::Str(s))
    }
}
impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Value::List(items)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    root: BTreeMap<String, Value>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of top-level keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Top-level entries in key order (rendering walks subtrees itself).
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root.iter()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.root.insert(key.to_string(), value);
    }

    /// Resolve a path to a value. Absent keys and descent through a
    /// leaf both yield `None` (soft NotFound); reads never fail.
    pub fn get(&self, path: &DottedPath) -> Option<&Value> {
        let segs = path.segments();
        let mut cur = &self.root;
        for seg in &segs[..segs.len() - 1] {
            match cur.get(seg.as_str()) {
                Some(Value::Node(t)) => cur = &t.root,
                _ => return None,
            }
        }
        cur.get(segs[segs.len() - 1].as_str())
    }

    /// Replace the value at `path`, creating intermediate nodes for
    /// absent prefix segments. An existing leaf/list on the prefix is
    /// an addressing error and leaves the tree unchanged.
    pub fn set(&mut self, path: &DottedPath, value: Value) -> Result<(), StoreError> {
        if let Some(n) = self.addressing_conflict(path) {
            return Err(StoreError::Addressing {
                path: path.as_str().to_string(),
                prefix: path.prefix_str(n),
            });
        }
        let segs = path.segments();
        let mut cur = &mut self.root;
        for seg in &segs[..segs.len() - 1] {
            let slot = cur
                .entry(seg.clone())
                .or_insert_with(|| Value::Node(Tree::new()));
            match slot {
                Value::Node(t) => cur = &mut t.root,
                // Excluded by the conflict check above.
                _ => unreachable!("addressing conflict after precheck"),
            }
        }
        cur.insert(segs[segs.len() - 1].clone(), value);
        Ok(())
    }

    /// If a strict prefix of `path` resolves to a non-node, return the
    /// length of that prefix. Absent prefixes are fine (they will be
    /// created on set).
    pub fn addressing_conflict(&self, path: &DottedPath) -> Option<usize> {
        let segs = path.segments();
        let mut cur = &self.root;
        for (i, seg) in segs[..segs.len() - 1].iter().enumerate() {
            match cur.get(seg.as_str()) {
                Some(Value::Node(t)) => cur = &t.root,
                Some(_) => return Some(i + 1),
                None => return None,
            }
        }
        None
    }
}

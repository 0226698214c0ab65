//! Validator registry with longest-prefix lookup.
//!
//! A validator is `(candidate, current_tree) -> Result<normalized,
//! reason>`: it may reject outright, pass the candidate through, or
//! return a normalized replacement (clamping, filtering). Lookup for a
//! staged path "a.b.c" tries, in order: exact "a.b.c", then "a.b.*",
//! then "a.*", then the global "*". No match means "accept unchanged",
//! the permissive default, so a handful of registered patterns covers
//! an arbitrarily large tree.
//!
//! The registry is populated through the store builder and immutable
//! once the store is open.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::StoreError;
use crate::path::{DottedPath, PathPattern};
use crate::tree::{Tree, Value};

pub type ValidatorFn = Arc<dyn Fn(&Value, &Tree) -> Result<Value, String> + Send + Sync>;

#[derive(Default)]
pub struct ValidatorRegistry {
    exact: HashMap<String, ValidatorFn>,
    prefix: HashMap<String, ValidatorFn>,
    global: Option<ValidatorFn>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under a pattern string. Re-registering a pattern
    /// replaces the previous validator (last one wins).
    pub fn register(&mut self, pattern: &str, f: ValidatorFn) -> Result<(), StoreError> {
        match PathPattern::parse(pattern)? {
            PathPattern::Exact(p) => {
                self.exact.insert(p.as_str().to_string(), f);
            }
            PathPattern::Prefix(p) => {
                self.prefix.insert(p.as_str().to_string(), f);
            }
            PathPattern::Global => {
                self.global = Some(f);
            }
        }
        Ok(())
    }

    /// Most specific registered validator for `path`, if any.
    pub fn lookup(&self, path: &DottedPath) -> Option<&ValidatorFn> {
        if let Some(f) = self.exact.get(path.as_str()) {
            return Some(f);
        }
        // Strict prefixes, longest first: "a.b.*" before "a.*".
        let segs = path.segments();
        for n in (1..segs.len()).rev() {
            let pref = segs[..n].join(".");
            if let Some(f) = self.prefix.get(&pref) {
                return Some(f);
            }
        }
        self.global.as_ref()
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.prefix.len() + usize::from(self.global.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

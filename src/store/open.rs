//! store/open — builder and initialization.
//!
//! Opening never fails because of persistence: an absent, unreadable or
//! corrupt snapshot falls back silently to the supplied defaults, with
//! a diagnostic and a metrics bump. The only fallible part of the
//! builder is validator-pattern parsing, which is a programmer error
//! reported from `open()`.

use std::collections::BTreeMap;

use crate::config::StoreOptions;
use crate::diag::{Diagnostics, LogDiagnostics};
use crate::errors::StoreError;
use crate::metrics;
use crate::registry::{ValidatorFn, ValidatorRegistry};
use crate::snapshot::{decode_snapshot, Persistence};
use crate::subs::SubRegistry;
use crate::tree::Tree;

use super::core::Store;

impl Store {
    /// Open with defaults, no validators, default options. Never fails.
    pub fn open(defaults: Tree, persistence: Box<dyn Persistence>) -> Store {
        StoreBuilder::new()
            .defaults(defaults)
            .persistence(persistence)
            .open_unchecked()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }
}

pub struct StoreBuilder {
    defaults: Tree,
    persistence: Option<Box<dyn Persistence>>,
    validators: Vec<(String, ValidatorFn)>,
    diag: Option<Box<dyn Diagnostics>>,
    opts: StoreOptions,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            defaults: Tree::new(),
            persistence: None,
            validators: Vec::new(),
            diag: None,
            opts: StoreOptions::default(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline tree used when no snapshot is loadable, and the target
    /// of reset().
    pub fn defaults(mut self, tree: Tree) -> Self {
        self.defaults = tree;
        self
    }

    /// Snapshot adapter. Without one the store is memoryless: loads
    /// nothing, saves go nowhere (a MemSnapshot without a keeper).
    pub fn persistence(mut self, p: Box<dyn Persistence>) -> Self {
        self.persistence = Some(p);
        self
    }

    /// Register a validator under a pattern ("a.b.c", "a.b.*" or "*").
    /// Patterns are parsed at open(); re-registration replaces.
    pub fn validator(mut self, pattern: &str, f: ValidatorFn) -> Self {
        self.validators.push((pattern.to_string(), f));
        self
    }

    pub fn diagnostics(mut self, d: Box<dyn Diagnostics>) -> Self {
        self.diag = Some(d);
        self
    }

    pub fn options(mut self, opts: StoreOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Finish the builder. Fails only on a malformed validator pattern.
    pub fn open(self) -> Result<Store, StoreError> {
        let mut registry = ValidatorRegistry::new();
        for (pattern, f) in &self.validators {
            registry.register(pattern, f.clone())?;
        }
        Ok(self.into_store(registry))
    }

    // Infallible path for Store::open (no validators to parse).
    pub(crate) fn open_unchecked(self) -> Store {
        self.into_store(ValidatorRegistry::new())
    }

    fn into_store(self, registry: ValidatorRegistry) -> Store {
        let diag = self.diag.unwrap_or_else(|| Box::new(LogDiagnostics));
        let mut persistence = self
            .persistence
            .unwrap_or_else(|| Box::new(crate::snapshot::MemSnapshot::new()));

        // Load-or-defaults: only a present-but-bad snapshot counts as a
        // fallback; an absent one is a normal first run.
        let tree = match persistence.load() {
            Ok(Some(blob)) => match decode_snapshot(&blob) {
                Ok(tree) => tree,
                Err(e) => {
                    diag.report("load snapshot", &e);
                    metrics::record_snapshot_load_fallback();
                    self.defaults.clone()
                }
            },
            Ok(None) => self.defaults.clone(),
            Err(e) => {
                diag.report("load snapshot", &e);
                metrics::record_snapshot_load_fallback();
                self.defaults.clone()
            }
        };

        Store {
            defaults: self.defaults,
            tree,
            staged: BTreeMap::new(),
            registry,
            persistence,
            diag,
            subs: SubRegistry::new(),
            opts: self.opts,
            revision: 0,
        }
    }
}

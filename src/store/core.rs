//! store/core — the Store struct and its read-only surface.
//!
//! The store owns the authoritative tree exclusively. All mutation goes
//! through stage_set/commit/reset on `&mut self`; readers get `&Tree`
//! views or structural clones. Single-threaded by design; a
//! multithreaded host wraps the whole store in its own mutex (there is
//! no finer-grained state to protect).

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::StoreOptions;
use crate::diag::Diagnostics;
use crate::path::DottedPath;
use crate::registry::ValidatorRegistry;
use crate::snapshot::Persistence;
use crate::subs::{Callback, SubRegistry, SubscriptionHandle};
use crate::tree::{Tree, Value};

/// A pending, uncommitted write.
pub(crate) struct StagedSet {
    pub(crate) path: DottedPath,
    pub(crate) value: Value,
}

pub struct Store {
    pub(crate) defaults: Tree,
    pub(crate) tree: Tree,
    // keyed by raw path: later stages on the same path overwrite
    // earlier ones; BTreeMap keeps apply order deterministic
    pub(crate) staged: BTreeMap<String, StagedSet>,
    pub(crate) registry: ValidatorRegistry,
    pub(crate) persistence: Box<dyn Persistence>,
    pub(crate) diag: Box<dyn Diagnostics>,
    pub(crate) subs: Arc<SubRegistry>,
    pub(crate) opts: StoreOptions,
    pub(crate) revision: u64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("staged", &self.staged.len())
            .field("opts", &self.opts)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Read-only view of the authoritative tree (for rendering).
    pub fn snapshot_tree(&self) -> &Tree {
        &self.tree
    }

    /// The default tree supplied at open.
    pub fn defaults(&self) -> &Tree {
        &self.defaults
    }

    /// Monotonic change counter: bumped by every successful commit and
    /// every reset, carried on published events.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.opts
    }

    /// Subscribe to changes under a dotted-path prefix (segment-aware;
    /// "" covers the whole tree). Dropping the handle unsubscribes.
    pub fn subscribe_prefix(&self, prefix: &str, cb: Callback) -> SubscriptionHandle {
        self.subs.subscribe(prefix.to_string(), cb)
    }
}

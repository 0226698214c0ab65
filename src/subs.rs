//! In-process subscriptions (change events) for the store.
//!
//! Scope:
//! - Local (in-process) pub/sub: the store publishes events after a
//!   successful commit or reset.
//! - Subscribe by dotted-path prefix; matching is segment-aware, so
//!   prefix "a.b" covers "a.b" and "a.b.c" but not "a.bc". The empty
//!   prefix covers everything.
//! - Drop of SubscriptionHandle unsubscribes.
//!
//! Notes:
//! - Callbacks run synchronously on the committing thread right after
//!   the tree swap. Keep them fast and non-blocking; spawn a thread if
//!   you need async work.
//! - The registry is owned by the store (one per instance). It does not
//!   depend on the snapshot format and can be reused.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::tree::Value;

/// A single change event:
/// - path: affected dotted path ("" for a whole-tree reset)
/// - value: Some(new value) for a committed write; None for reset
/// - rev: store revision assigned to the commit (monotonic)
#[derive(Clone, Debug)]
pub struct Event {
    pub path: String,
    pub value: Option<Value>,
    pub rev: u64,
}

pub type Callback = Arc<dyn Fn(&Event) + Send + Sync + 'static>;

#[derive(Default)]
struct SubInner {
    next_id: u64,
    subs: HashMap<u64, (String, Callback)>, // id -> (prefix, cb)
}

/// Subscription registry (held inside the store).
pub struct SubRegistry {
    inner: Mutex<SubInner>,
}

impl SubRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SubInner::default()),
        })
    }

    /// Subscribe for events under `prefix` (segment-aware).
    /// Returns a handle; dropping it unsubscribes.
    pub fn subscribe(self: &Arc<Self>, prefix: String, cb: Callback) -> SubscriptionHandle {
        let mut g = self.inner.lock().unwrap();
        let id = g.next_id;
        g.next_id = g.next_id.wrapping_add(1);
        g.subs.insert(id, (prefix, cb));
        drop(g);
        SubscriptionHandle {
            id,
            reg: Arc::downgrade(self),
        }
    }

    /// Publish an event to all subscribers whose prefix matches.
    pub fn publish(&self, ev: &Event) {
        let callbacks: Vec<Callback> = {
            let g = self.inner.lock().unwrap();
            g.subs
                .values()
                .filter_map(|(pref, cb)| {
                    if path_has_prefix(&ev.path, pref) {
                        Some(cb.clone())
                    } else {
                        None
                    }
                })
                .collect()
        };
        // Execute outside the lock
        for cb in callbacks {
            cb(ev);
        }
    }

    fn unsubscribe(&self, id: u64) {
        let mut g = self.inner.lock().unwrap();
        g.subs.remove(&id);
    }
}

/// RAII handle: unsubscribes on drop.
pub struct SubscriptionHandle {
    id: u64,
    reg: Weak<SubRegistry>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(reg) = self.reg.upgrade() {
            reg.unsubscribe(self.id);
        }
    }
}

/// Public helper for building callbacks.
pub fn callback<F>(f: F) -> Callback
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Segment-aware prefix test. A reset event carries the empty path and
/// matches every prefix; the empty prefix matches every path.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() || path.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

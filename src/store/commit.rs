//! store/commit — validate, merge, swap, persist, notify.
//!
//! Commit is all-or-nothing: every staged value is validated against
//! the *current* authoritative tree (not the partially-merged working
//! copy, so sibling changes in one batch cannot influence each other's
//! validation); any rejection aborts the whole batch with the tree and
//! the staged set untouched. On success the merged working copy is
//! swapped in atomically, the snapshot is saved (failure is non-fatal:
//! the in-memory tree stays authoritative, durability is merely lost
//! for that write), and one event per applied path is published.

use crate::errors::StoreError;
use crate::metrics;
use crate::path::DottedPath;
use crate::snapshot::encode_snapshot;
use crate::subs::Event;
use crate::tree::{Tree, Value};

use super::core::Store;

impl Store {
    pub fn commit(&mut self) -> Result<Tree, StoreError> {
        // Phase 1: validate everything against the authoritative tree.
        let mut applied: Vec<(DottedPath, Value)> = Vec::with_capacity(self.staged.len());
        for staged in self.staged.values() {
            let value = match self.registry.lookup(&staged.path) {
                Some(validate) => match validate(&staged.value, &self.tree) {
                    Ok(normalized) => normalized,
                    Err(reason) => {
                        metrics::record_commit_reject();
                        return Err(StoreError::Validation {
                            path: staged.path.as_str().to_string(),
                            reason,
                        });
                    }
                },
                // Permissive default: unvalidated paths pass through.
                None => staged.value.clone(),
            };
            applied.push((staged.path.clone(), value));
        }

        // Phase 2: merge into a working copy. A cross-staged addressing
        // conflict (batch staged both "a.b" and "a.b.c") aborts here.
        let mut work = self.tree.clone();
        for (path, value) in &applied {
            if let Err(e) = work.set(path, value.clone()) {
                metrics::record_commit_reject();
                return Err(e);
            }
        }

        // Phase 3: swap, persist, notify.
        self.tree = work;
        self.staged.clear();
        self.revision += 1;
        metrics::record_commit();

        if self.opts.save_on_commit {
            self.save_snapshot();
        }

        for (path, value) in applied {
            self.subs.publish(&Event {
                path: path.as_str().to_string(),
                value: Some(value),
                rev: self.revision,
            });
            metrics::record_event_published();
        }

        Ok(self.tree.clone())
    }

    /// Restore the defaults, discarding staged edits, and persist.
    pub fn reset(&mut self) {
        self.tree = self.defaults.clone();
        self.staged.clear();
        self.revision += 1;
        metrics::record_reset();

        if self.opts.save_on_commit {
            self.save_snapshot();
        }

        // One whole-tree event; "" matches every subscription.
        self.subs.publish(&Event {
            path: String::new(),
            value: None,
            rev: self.revision,
        });
        metrics::record_event_published();
    }

    /// Persist the current tree explicitly (for save_on_commit=false
    /// embedders). Returns false if the save failed; the failure has
    /// already been reported to diagnostics.
    pub fn flush(&mut self) -> bool {
        self.save_snapshot()
    }

    fn save_snapshot(&mut self) -> bool {
        let blob = match encode_snapshot(&self.tree, self.opts.pretty_json) {
            Ok(blob) => blob,
            Err(e) => {
                metrics::record_snapshot_save_error();
                self.diag.report("encode snapshot", &e);
                return false;
            }
        };
        match self.persistence.save(&blob) {
            Ok(()) => {
                metrics::record_snapshot_save();
                true
            }
            Err(e) => {
                metrics::record_snapshot_save_error();
                self.diag.report("save snapshot", &e);
                false
            }
        }
    }
}

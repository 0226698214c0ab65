//! store/stage — staged (uncommitted) mutations.
//!
//! stage_set records a pending write without touching the authoritative
//! tree. Within a batch, later stages on the same path overwrite
//! earlier ones. Descent through an existing leaf is rejected eagerly
//! against the current tree; conflicts between staged paths of the same
//! batch surface at commit time and abort it.

use crate::errors::StoreError;
use crate::metrics;
use crate::path::DottedPath;
use crate::tree::Value;

use super::core::{StagedSet, Store};

impl Store {
    pub fn stage_set(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let p = DottedPath::parse(path)?;
        if let Some(n) = self.tree.addressing_conflict(&p) {
            return Err(StoreError::Addressing {
                path: p.as_str().to_string(),
                prefix: p.prefix_str(n),
            });
        }
        self.staged.insert(
            p.as_str().to_string(),
            StagedSet { path: p, value },
        );
        metrics::record_staged_set();
        Ok(())
    }

    /// Abandon the whole staged batch (the "discard changes" button).
    pub fn discard_staged(&mut self) {
        self.staged.clear();
    }

    /// Staged value for a path, if any (UI renders pending edits).
    pub fn staged_value(&self, path: &str) -> Option<&Value> {
        self.staged.get(path).map(|s| &s.value)
    }
}

//! In-memory snapshot adapter.
//!
//! For tests and for embedders whose durable storage lives elsewhere
//! (e.g. a browser-profile key-value blob synced by the host). State is
//! shared across clones, so a caller can hand one clone to the store
//! and inspect saves through another.

use std::sync::{Arc, Mutex};

use crate::errors::PersistError;

use super::Persistence;

#[derive(Default)]
struct MemInner {
    blob: Option<Vec<u8>>,
    saves: u64,
}

#[derive(Clone, Default)]
pub struct MemSnapshot {
    inner: Arc<Mutex<MemInner>>,
}

impl MemSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start pre-seeded, as if a previous session had saved `blob`.
    pub fn with_blob(blob: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemInner {
                blob: Some(blob),
                saves: 0,
            })),
        }
    }

    /// Last saved blob, if any.
    pub fn blob(&self) -> Option<Vec<u8>> {
        self.inner.lock().unwrap().blob.clone()
    }

    /// Number of save() calls observed.
    pub fn saves(&self) -> u64 {
        self.inner.lock().unwrap().saves
    }
}

impl Persistence for MemSnapshot {
    fn load(&mut self) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.inner.lock().unwrap().blob.clone())
    }

    fn save(&mut self, blob: &[u8]) -> Result<(), PersistError> {
        let mut g = self.inner.lock().unwrap();
        g.blob = Some(blob.to_vec());
        g.saves += 1;
        Ok(())
    }
}

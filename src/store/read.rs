//! store/read — dotted-path reads.

use crate::errors::StoreError;
use crate::path::DottedPath;
use crate::tree::Value;

use super::core::Store;

impl Store {
    /// Resolve a dotted path against the authoritative tree.
    /// `Err` only for a malformed path; an absent path (or one that
    /// descends through a leaf) is `Ok(None)`, and the caller supplies
    /// its own fallback.
    pub fn get(&self, path: &str) -> Result<Option<&Value>, StoreError> {
        let p = DottedPath::parse(path)?;
        Ok(self.tree.get(&p))
    }

    /// Same, for a pre-parsed path.
    pub fn get_path(&self, path: &DottedPath) -> Option<&Value> {
        self.tree.get(path)
    }
}

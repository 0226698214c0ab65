//! Typed errors for the store API.
//!
//! NotFound is deliberately not an error: `Store::get` returns
//! `Ok(None)` for absent paths, and callers substitute their own
//! fallback. Persistence failures never escape `commit`/`reset`;
//! they go to the diagnostics sink and the in-memory tree stays
//! authoritative.

use thiserror::Error;

/// Errors returned by store operations (addressing and validation).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed dotted path (empty input, empty segment, stray '*').
    /// Rejected before any traversal; never corrupts state.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A prefix of the path resolves to a leaf, so the path cannot
    /// address anything below it.
    #[error("path {path:?} descends through leaf at {prefix:?}")]
    Addressing { path: String, prefix: String },

    /// A registered validator rejected a staged value at commit.
    /// The whole batch is aborted; the authoritative tree is untouched.
    #[error("validation rejected {path:?}: {reason}")]
    Validation { path: String, reason: String },
}

/// Errors surfaced by persistence adapters and the snapshot codec.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot bytes fail structural checks (magic/version/CRC/length).
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// JSON encode/decode of the tree payload failed.
    #[error("codec: {0}")]
    Codec(String),
}

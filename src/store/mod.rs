//! store — the high-level API layer.
//!
//! Split by submodule:
//! - core.rs   — the Store struct, fields, accessors, subscriptions
//! - open.rs   — builder, open with load-or-defaults fallback
//! - read.rs   — dotted-path reads
//! - stage.rs  — staged (uncommitted) mutations
//! - commit.rs — validate/merge/swap/persist/notify, reset, flush

pub mod commit;
pub mod core;
pub mod open;
pub mod read;
pub mod stage;

pub use core::Store;
pub use open::StoreBuilder;

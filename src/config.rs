//! Centralized configuration for CanopyCfg stores.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - StoreOptions::from_env() reads CANOPY_* variables; fluent with_*
//!   setters override specific fields.
//!
//! Defaults:
//! - pretty_json = false (compact snapshot payload)
//! - data_fsync = true (fsync snapshot file + parent dir on save;
//!   settings files are tiny, durability wins over write latency)
//! - save_on_commit = true (persist on every successful commit; turn
//!   off to batch saves and call Store::flush() yourself)

use std::fmt;

/// Top-level options consumed by the store and the file adapter.
#[derive(Clone, Debug)]
pub struct StoreOptions {
    /// Pretty-print the JSON payload inside snapshots.
    /// Env: CANOPY_PRETTY_JSON (default false; "1|true|on|yes" => true)
    pub pretty_json: bool,

    /// fsync the snapshot file (and its directory) on save.
    /// Env: CANOPY_DATA_FSYNC (default true)
    pub data_fsync: bool,

    /// Persist automatically on every successful commit and on reset.
    /// Env: CANOPY_SAVE_ON_COMMIT (default true)
    pub save_on_commit: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty_json: false,
            data_fsync: true,
            save_on_commit: true,
        }
    }
}

fn truthy(s: &str) -> bool {
    let s = s.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl StoreOptions {
    /// Load options from environment variables.
    pub fn from_env() -> Self {
        let mut opts = Self::default();

        if let Ok(v) = std::env::var("CANOPY_PRETTY_JSON") {
            opts.pretty_json = truthy(&v);
        }
        if let Ok(v) = std::env::var("CANOPY_DATA_FSYNC") {
            opts.data_fsync = truthy(&v);
        }
        if let Ok(v) = std::env::var("CANOPY_SAVE_ON_COMMIT") {
            opts.save_on_commit = truthy(&v);
        }

        opts
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_pretty_json(mut self, on: bool) -> Self {
        self.pretty_json = on;
        self
    }

    pub fn with_data_fsync(mut self, on: bool) -> Self {
        self.data_fsync = on;
        self
    }

    pub fn with_save_on_commit(mut self, on: bool) -> Self {
        self.save_on_commit = on;
        self
    }
}

impl fmt::Display for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreOptions {{ pretty_json: {}, data_fsync: {}, save_on_commit: {} }}",
            self.pretty_json, self.data_fsync, self.save_on_commit,
        )
    }
}

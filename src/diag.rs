//! Diagnostics sink for non-fatal failures.
//!
//! The store reports recoverable problems (corrupt snapshot at open,
//! failed save) here and carries on. The default sink forwards to the
//! `log` crate; embedders can supply their own to surface warnings in
//! a UI.

use std::fmt::Display;

pub trait Diagnostics {
    fn report(&self, context: &str, error: &dyn Display);
}

/// Default sink: `log::warn!` with the context string as prefix.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, context: &str, error: &dyn Display) {
        log::warn!("{}: {}", context, error);
    }
}

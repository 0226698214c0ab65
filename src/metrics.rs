//! Lightweight global metrics for CanopyCfg.
//!
//! Thread-safe atomic counters for the store subsystems:
//! - staging / commit
//! - snapshot persistence
//! - change notification

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Staging / commit -----
static STAGED_SETS: AtomicU64 = AtomicU64::new(0);
static COMMITS_TOTAL: AtomicU64 = AtomicU64::new(0);
static COMMIT_REJECTS: AtomicU64 = AtomicU64::new(0);
static RESETS_TOTAL: AtomicU64 = AtomicU64::new(0);

// ----- Snapshot persistence -----
static SNAPSHOT_SAVES: AtomicU64 = AtomicU64::new(0);
static SNAPSHOT_SAVE_ERRORS: AtomicU64 = AtomicU64::new(0);
static SNAPSHOT_LOAD_FALLBACKS: AtomicU64 = AtomicU64::new(0);

// ----- Change notification -----
static EVENTS_PUBLISHED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub staged_sets: u64,
    pub commits_total: u64,
    pub commit_rejects: u64,
    pub resets_total: u64,

    pub snapshot_saves: u64,
    pub snapshot_save_errors: u64,
    pub snapshot_load_fallbacks: u64,

    pub events_published: u64,
}

impl MetricsSnapshot {
    /// Share of commit attempts that were rejected.
    pub fn reject_ratio(&self) -> f64 {
        let total = self.commits_total + self.commit_rejects;
        if total == 0 {
            0.0
        } else {
            self.commit_rejects as f64 / total as f64
        }
    }
}

// ----- Recorders -----
pub fn record_staged_set() {
    STAGED_SETS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_commit() {
    COMMITS_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_commit_reject() {
    COMMIT_REJECTS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_reset() {
    RESETS_TOTAL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_snapshot_save() {
    SNAPSHOT_SAVES.fetch_add(1, Ordering::Relaxed);
}
pub fn record_snapshot_save_error() {
    SNAPSHOT_SAVE_ERRORS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_snapshot_load_fallback() {
    SNAPSHOT_LOAD_FALLBACKS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_event_published() {
    EVENTS_PUBLISHED.fetch_add(1, Ordering::Relaxed);
}

/// Consistent-enough snapshot of all counters (Relaxed loads).
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        staged_sets: STAGED_SETS.load(Ordering::Relaxed),
        commits_total: COMMITS_TOTAL.load(Ordering::Relaxed),
        commit_rejects: COMMIT_REJECTS.load(Ordering::Relaxed),
        resets_total: RESETS_TOTAL.load(Ordering::Relaxed),
        snapshot_saves: SNAPSHOT_SAVES.load(Ordering::Relaxed),
        snapshot_save_errors: SNAPSHOT_SAVE_ERRORS.load(Ordering::Relaxed),
        snapshot_load_fallbacks: SNAPSHOT_LOAD_FALLBACKS.load(Ordering::Relaxed),
        events_published: EVENTS_PUBLISHED.load(Ordering::Relaxed),
    }
}

/// Zero all counters (tests).
pub fn reset() {
    STAGED_SETS.store(0, Ordering::Relaxed);
    COMMITS_TOTAL.store(0, Ordering::Relaxed);
    COMMIT_REJECTS.store(0, Ordering::Relaxed);
    RESETS_TOTAL.store(0, Ordering::Relaxed);
    SNAPSHOT_SAVES.store(0, Ordering::Relaxed);
    SNAPSHOT_SAVE_ERRORS.store(0, Ordering::Relaxed);
    SNAPSHOT_LOAD_FALLBACKS.store(0, Ordering::Relaxed);
    EVENTS_PUBLISHED.store(0, Ordering::Relaxed);
}

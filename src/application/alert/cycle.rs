//! Results of one poll cycle.

use crate::error::{DirectoryError, FetchError};

/// Counters collected while evaluating and delivering one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Prices in the snapshot.
    pub readings: usize,
    /// Subscribers with an address and at least one rule.
    pub subscribers: usize,
    /// Subscribers skipped for lacking an address or rules.
    pub skipped_subscribers: usize,
    /// Rules evaluated across all eligible subscribers.
    pub rules_evaluated: usize,
    /// Rules whose condition held.
    pub triggered: usize,
    /// Triggered rules suppressed because the price was already notified.
    pub suppressed: usize,
    /// Notifications delivered.
    pub sent: usize,
    /// Notifications that failed or timed out.
    pub failed: usize,
    /// Dedup entries dropped during reconciliation.
    pub pruned: usize,
}

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Snapshot evaluated; alerts (if any) dispatched.
    Completed(CycleReport),
    /// No usable snapshot; evaluation skipped.
    FetchFailed(FetchError),
    /// Subscribers could not be listed; evaluation skipped.
    DirectoryFailed(DirectoryError),
}

impl CycleOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Report of a completed cycle.
    #[must_use]
    pub const fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::FetchFailed(_) | Self::DirectoryFailed(_) => None,
        }
    }
}

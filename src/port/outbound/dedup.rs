//! Deduplication port for triggered alerts.
//!
//! Tracks, per (subscriber, rule) pair, the price that last produced a
//! notification so an unchanged triggering price is not re-sent every cycle.

use std::collections::HashSet;

use crate::domain::DedupeKey;

/// Port for suppressing repeat notifications.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`). `should_notify` is a
/// single atomic check-and-set per key: two concurrent calls with the same
/// key and price can never both return `true`.
pub trait AlertDeduplicator: Send + Sync {
    /// Check whether `price` is new for `key` and record it if so.
    ///
    /// Returns `true` when no price is stored for `key` or the stored price
    /// differs from `price` (exact comparison). The stored value is
    /// overwritten before returning `true` and left alone otherwise.
    fn should_notify(&self, key: &DedupeKey, price: f64) -> bool;

    /// Drop every entry whose key is not in `live`. Returns how many were
    /// removed.
    fn retain(&self, live: &HashSet<DedupeKey>) -> usize;

    /// Number of remembered keys.
    fn len(&self) -> usize;

    /// Whether no key is remembered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

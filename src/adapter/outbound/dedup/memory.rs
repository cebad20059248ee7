//! Process-local deduplication state.
//!
//! Implements the [`AlertDeduplicator`] port on top of a concurrent map.
//! State lives as long as the owning process and is not persisted.

use std::collections::HashSet;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::DedupeKey;
use crate::port::AlertDeduplicator;

/// Thread-safe last-notified-price store.
///
/// The check-and-set in [`should_notify`](AlertDeduplicator::should_notify)
/// holds the shard lock for the key, so a key is committed at most once per
/// distinct price even under concurrent callers.
#[derive(Debug, Default)]
pub struct InMemoryDeduplicator {
    /// Last price that produced a notification, per key.
    last_notified: DashMap<DedupeKey, f64>,
}

impl InMemoryDeduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last notified price for `key`, for diagnostics and tests.
    #[must_use]
    pub fn last_notified(&self, key: &DedupeKey) -> Option<f64> {
        self.last_notified.get(key).map(|entry| *entry.value())
    }
}

impl AlertDeduplicator for InMemoryDeduplicator {
    #[allow(clippy::float_cmp)]
    fn should_notify(&self, key: &DedupeKey, price: f64) -> bool {
        match self.last_notified.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == price {
                    return false;
                }
                entry.insert(price);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(price);
                true
            }
        }
    }

    fn retain(&self, live: &HashSet<DedupeKey>) -> usize {
        let before = self.last_notified.len();
        self.last_notified.retain(|key, _| live.contains(key));
        before.saturating_sub(self.last_notified.len())
    }

    fn len(&self) -> usize {
        self.last_notified.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::domain::{AlertRule, Commodity, SubscriberId};

    fn key(subscriber: &str, threshold: f64) -> DedupeKey {
        DedupeKey::new(
            &SubscriberId::new(subscriber),
            &AlertRule::above(Commodity::Ron95, threshold),
        )
    }

    #[test]
    fn first_price_notifies() {
        let dedup = InMemoryDeduplicator::new();
        assert!(dedup.should_notify(&key("alice", 3.0), 3.5));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn same_price_is_suppressed() {
        let dedup = InMemoryDeduplicator::new();
        let k = key("alice", 3.0);
        assert!(dedup.should_notify(&k, 3.5));
        assert!(!dedup.should_notify(&k, 3.5));
        assert!(!dedup.should_notify(&k, 3.5));
        assert_eq!(dedup.last_notified(&k), Some(3.5));
    }

    #[test]
    fn changed_price_rearms() {
        let dedup = InMemoryDeduplicator::new();
        let k = key("alice", 3.0);
        assert!(dedup.should_notify(&k, 3.50));
        assert!(dedup.should_notify(&k, 3.60));
        assert!(dedup.should_notify(&k, 3.50));
        assert_eq!(dedup.last_notified(&k), Some(3.50));
    }

    #[test]
    fn suppressed_call_leaves_state_alone() {
        let dedup = InMemoryDeduplicator::new();
        let k = key("alice", 3.0);
        dedup.should_notify(&k, 3.5);
        dedup.should_notify(&k, 3.5);
        assert_eq!(dedup.last_notified(&k), Some(3.5));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let dedup = InMemoryDeduplicator::new();
        assert!(dedup.should_notify(&key("alice", 3.0), 3.5));
        assert!(dedup.should_notify(&key("bob", 3.0), 3.5));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn no_epsilon_tolerance() {
        let dedup = InMemoryDeduplicator::new();
        let k = key("alice", 3.0);
        assert!(dedup.should_notify(&k, 3.5));
        assert!(dedup.should_notify(&k, 3.5 + f64::EPSILON * 4.0));
    }

    #[test]
    fn retain_drops_stale_keys() {
        let dedup = InMemoryDeduplicator::new();
        let keep = key("alice", 3.0);
        let drop = key("bob", 3.0);
        dedup.should_notify(&keep, 3.5);
        dedup.should_notify(&drop, 3.5);

        let live: HashSet<_> = [keep.clone()].into_iter().collect();
        assert_eq!(dedup.retain(&live), 1);
        assert_eq!(dedup.len(), 1);
        assert_eq!(dedup.last_notified(&keep), Some(3.5));
        assert_eq!(dedup.last_notified(&drop), None);
    }

    #[test]
    fn retained_key_stays_suppressed() {
        let dedup = InMemoryDeduplicator::new();
        let k = key("alice", 3.0);
        dedup.should_notify(&k, 3.5);
        dedup.retain(&[k.clone()].into_iter().collect());
        assert!(!dedup.should_notify(&k, 3.5));
    }

    #[test]
    fn concurrent_callers_commit_once() {
        let dedup = Arc::new(InMemoryDeduplicator::new());
        let k = key("alice", 3.0);
        let wins = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let dedup = Arc::clone(&dedup);
                let wins = Arc::clone(&wins);
                let k = k.clone();
                std::thread::spawn(move || {
                    if dedup.should_notify(&k, 3.5) {
                        wins.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should complete without panic");
        }

        assert_eq!(wins.load(Ordering::SeqCst), 1);
    }
}

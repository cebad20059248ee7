//! Identity under which the last notified price is remembered.

use std::fmt;

use super::commodity::Commodity;
use super::id::SubscriberId;
use super::subscriber::{AlertRule, Direction};

/// Deterministic key for one (subscriber, rule) pair.
///
/// The subscriber is part of the key, so identical rules held by different
/// subscribers never suppress each other. The threshold is keyed by its bit
/// pattern with negative zero folded into zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    subscriber: SubscriberId,
    commodity: Commodity,
    direction: Direction,
    threshold_bits: u64,
}

impl DedupeKey {
    #[must_use]
    pub fn new(subscriber: &SubscriberId, rule: &AlertRule) -> Self {
        let threshold = if rule.threshold == 0.0 {
            0.0
        } else {
            rule.threshold
        };
        Self {
            subscriber: subscriber.clone(),
            commodity: rule.commodity,
            direction: rule.direction,
            threshold_bits: threshold.to_bits(),
        }
    }

    #[must_use]
    pub fn subscriber(&self) -> &SubscriberId {
        &self.subscriber
    }

    #[must_use]
    pub const fn commodity(&self) -> Commodity {
        self.commodity
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        f64::from_bits(self.threshold_bits)
    }
}

impl fmt::Display for DedupeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.subscriber,
            self.commodity,
            self.direction,
            self.threshold()
        )
    }
}

//! A triggered rule that has been cleared for delivery.

use super::dedup::DedupeKey;
use super::id::{DeliveryAddress, SubscriberId};
use super::subscriber::AlertRule;

/// Alert authorized by the deduplicator, waiting to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub subscriber: SubscriberId,
    pub address: DeliveryAddress,
    pub rule: AlertRule,
    pub price: f64,
    pub key: DedupeKey,
}

impl Alert {
    #[must_use]
    pub fn new(
        subscriber: &SubscriberId,
        address: &DeliveryAddress,
        rule: &AlertRule,
        price: f64,
    ) -> Self {
        Self {
            subscriber: subscriber.clone(),
            address: address.clone(),
            rule: rule.clone(),
            price,
            key: DedupeKey::new(subscriber, rule),
        }
    }
}

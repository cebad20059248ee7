//! Process-local subscriber directory.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{AlertRule, DeliveryAddress, Subscriber, SubscriberId};
use crate::error::DirectoryError;
use crate::port::SubscriberDirectory;

/// Subscriber directory held in memory, in registration order.
///
/// Nothing survives a restart. Suitable for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with `subscribers`.
    #[must_use]
    pub fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        Self {
            subscribers: RwLock::new(subscribers),
        }
    }

    /// Insert `subscriber`, replacing any record with the same id.
    pub fn insert(&self, subscriber: Subscriber) {
        let mut subscribers = self.subscribers.write();
        match subscribers.iter_mut().find(|s| s.id == subscriber.id) {
            Some(existing) => *existing = subscriber,
            None => subscribers.push(subscriber),
        }
    }

    /// Append `rule` to `id`, creating an address-less record if needed.
    pub fn add_rule(&self, id: &SubscriberId, rule: AlertRule) {
        let mut subscribers = self.subscribers.write();
        match subscribers.iter_mut().find(|s| &s.id == id) {
            Some(existing) => existing.rules.push(rule),
            None => subscribers.push(Subscriber::new(id.clone()).with_rule(rule)),
        }
    }

    /// Remove `id`. Returns true if it was present.
    pub fn remove(&self, id: &SubscriberId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| &s.id != id);
        subscribers.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

#[async_trait]
impl SubscriberDirectory for InMemoryDirectory {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError> {
        Ok(self.subscribers.read().clone())
    }

    async fn upsert_subscriber(
        &self,
        id: &SubscriberId,
        address: &DeliveryAddress,
    ) -> Result<(), DirectoryError> {
        let mut subscribers = self.subscribers.write();
        match subscribers.iter_mut().find(|s| &s.id == id) {
            Some(existing) => existing.address = Some(address.clone()),
            None => subscribers.push(Subscriber::new(id.clone()).with_address(address.clone())),
        }
        Ok(())
    }
}

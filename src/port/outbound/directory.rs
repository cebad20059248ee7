//! Subscriber directory port.

use async_trait::async_trait;

use crate::domain::{DeliveryAddress, Subscriber, SubscriberId};
use crate::error::DirectoryError;

/// Store of subscriber identities and their alert rules.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); the poll loop and
///   the command listener hold the same instance.
/// - `list_subscribers` returns rules in the order they were added.
#[async_trait]
pub trait SubscriberDirectory: Send + Sync {
    /// Every subscriber currently on record.
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, DirectoryError>;

    /// Register `id`, or refresh its delivery address if already known.
    ///
    /// Existing rules are left untouched.
    async fn upsert_subscriber(
        &self,
        id: &SubscriberId,
        address: &DeliveryAddress,
    ) -> Result<(), DirectoryError>;
}

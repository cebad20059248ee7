//! Notifier port for alert delivery.

use async_trait::async_trait;

use crate::domain::DeliveryAddress;
use crate::error::SendError;

/// Delivers a text message to a delivery address.
///
/// There are no delivery guarantees beyond the outcome of one call; the
/// engine never retries a failed send within a cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `address`.
    async fn send(&self, address: &DeliveryAddress, text: &str) -> Result<(), SendError>;
}

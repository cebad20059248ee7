//! Notification adapters.
//!
//! Implements the [`Notifier`] port for the supported delivery backends.

#[cfg(feature = "telegram")]
pub mod telegram;

use async_trait::async_trait;
use tracing::info;

use crate::domain::DeliveryAddress;
use crate::error::SendError;
use crate::port::Notifier;

/// A logging notifier that reports alerts via tracing instead of delivering
/// them. Used for dry runs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, address: &DeliveryAddress, text: &str) -> Result<(), SendError> {
        info!(address = %address, text = %text, "Alert (dry run, not delivered)");
        Ok(())
    }
}

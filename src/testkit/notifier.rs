//! Recording [`Notifier`] for delivery assertions.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::DeliveryAddress;
use crate::error::SendError;
use crate::port::Notifier;

/// One delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub address: DeliveryAddress,
    pub text: String,
}

/// Thread-safe message collector. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    attempts: Arc<Mutex<Vec<DeliveryAddress>>>,
    failing: Arc<Mutex<HashSet<DeliveryAddress>>>,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every send to `address` with a transport error.
    pub fn failing_for(self, address: impl Into<DeliveryAddress>) -> Self {
        self.failing.lock().insert(address.into());
        self
    }

    /// Sleep before each send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Successfully delivered messages, in completion order.
    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Every address a send was attempted for, including failures.
    pub fn attempts(&self) -> Vec<DeliveryAddress> {
        self.attempts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, address: &DeliveryAddress, text: &str) -> Result<(), SendError> {
        self.attempts.lock().push(address.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().contains(address) {
            return Err(SendError::Transport(format!("scripted failure for {address}")));
        }

        self.sent.lock().push(SentMessage {
            address: address.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

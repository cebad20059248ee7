//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Subscriber handle - newtype for type safety.
///
/// Unique within the directory. For Telegram registrations this is the
/// sender's username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Create a new `SubscriberId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the subscriber ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubscriberId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SubscriberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque delivery token understood by a notifier.
///
/// The core never interprets it; the Telegram notifier expects a chat id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryAddress(String);

impl DeliveryAddress {
    /// Create a new `DeliveryAddress` from a string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Get the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the address carries no usable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DeliveryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeliveryAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DeliveryAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<i64> for DeliveryAddress {
    fn from(chat_id: i64) -> Self {
        Self::new(chat_id.to_string())
    }
}

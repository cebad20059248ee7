//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the alert engine and the systems it
//! talks to. Adapters implement them; the engine only ever sees the traits.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Alert engine       │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Price   │            │ Subscriber  │              │ Notifier  │
//! │ Source  │            │ Directory   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PriceSource`] - Latest price snapshot
//! - [`SubscriberDirectory`] - Subscriber records and registration
//! - [`Notifier`] - Message delivery (Telegram, logging)
//! - [`AlertDeduplicator`] - Last-notified-price state

pub mod outbound;

pub use outbound::dedup::AlertDeduplicator;
pub use outbound::directory::SubscriberDirectory;
pub use outbound::notifier::Notifier;
pub use outbound::price::PriceSource;

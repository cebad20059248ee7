//! Alert evaluation and delivery.
//!
//! The [`AlertEngine`] owns the fetch, evaluate, notify cycle. Trigger logic
//! lives in [`crate::domain::trigger`]; repeat suppression is delegated to an
//! injected [`AlertDeduplicator`](crate::port::AlertDeduplicator).

mod cycle;
mod engine;
mod message;

pub use cycle::{CycleOutcome, CycleReport};
pub use engine::{AlertEngine, EngineConfig};
pub use message::format_alert_message;

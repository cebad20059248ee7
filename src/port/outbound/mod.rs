//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the alert engine depends on:
//! the price feed, the subscriber directory, message delivery and the
//! deduplication state.

pub mod dedup;
pub mod directory;
pub mod notifier;
pub mod price;

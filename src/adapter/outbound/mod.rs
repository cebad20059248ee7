//! Outbound adapters (driven side).

pub mod dedup;
pub mod directory;
pub mod notifier;
pub mod price;
pub mod sqlite;

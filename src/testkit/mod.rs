//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`price`] - `ScriptedPriceSource`, a queue of fetch results.
//! - [`notifier`] - `RecordingNotifier`, which captures deliveries and can be
//!   told to fail for chosen addresses.
//! - [`directory`] - `CountingDirectory` and `FailingDirectory`.
//! - [`domain`] - Builders for snapshots and subscribers.

pub mod directory;
pub mod domain;
pub mod notifier;
pub mod price;

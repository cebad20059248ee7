//! Fuelwatch - fuel price threshold alerts.
//!
//! Polls a fuel price feed on a fixed interval, evaluates every subscriber's
//! standing rules against the latest snapshot and notifies each subscriber
//! once per distinct triggering price.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Commodities, snapshots, rules, trigger evaluation, dedup keys
//! - [`port`] - Traits for price sources, subscriber directories, notifiers
//!   and deduplicators
//! - [`adapter`] - HTTP price source, SQLite and in-memory directories,
//!   Telegram and log notifiers, the CLI and the Telegram command listener
//! - [`application`] - The [`AlertEngine`](application::alert::AlertEngine)
//!   poll loop
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and command listener
//! - `testkit` - Test doubles for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

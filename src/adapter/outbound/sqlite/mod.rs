//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed subscriber directory using Diesel ORM.

pub mod database;
pub mod directory;

pub use directory::SqliteDirectory;

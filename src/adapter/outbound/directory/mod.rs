//! Subscriber directory adapters.
//!
//! The SQLite-backed directory lives in
//! [`sqlite`](crate::adapter::outbound::sqlite); this module holds the
//! process-local variant.

mod memory;

pub use memory::InMemoryDirectory;

//! Alert deduplication adapters.

mod memory;

pub use memory::InMemoryDeduplicator;

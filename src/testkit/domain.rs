//! Builders for domain values used across tests.

use crate::domain::{AlertRule, Commodity, PriceSnapshot, Subscriber};

/// Snapshot holding exactly the given readings.
pub fn snapshot(readings: &[(Commodity, f64)]) -> PriceSnapshot {
    readings.iter().copied().collect()
}

/// Snapshot with only a RON95 reading.
pub fn ron95(price: f64) -> PriceSnapshot {
    snapshot(&[(Commodity::Ron95, price)])
}

/// Registered subscriber whose chat id is `chat` with the given rules.
pub fn subscriber(id: &str, chat: i64, rules: &[AlertRule]) -> Subscriber {
    rules
        .iter()
        .cloned()
        .fold(Subscriber::new(id).with_address(chat), Subscriber::with_rule)
}

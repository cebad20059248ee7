//! One cycle's worth of price readings.

use std::collections::BTreeMap;

use super::commodity::Commodity;

/// Latest price per commodity, valid for a single poll cycle.
///
/// Only non-negative finite readings are held; anything else is treated as
/// missing data for that commodity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSnapshot {
    prices: BTreeMap<Commodity, f64>,
}

impl PriceSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading. Returns `false` (and records nothing) when the
    /// value is negative, NaN or infinite.
    pub fn insert(&mut self, commodity: Commodity, price: f64) -> bool {
        if !price.is_finite() || price < 0.0 {
            return false;
        }
        self.prices.insert(commodity, price);
        true
    }

    /// Builder-style [`insert`](Self::insert) that drops unusable readings.
    #[must_use]
    pub fn with(mut self, commodity: Commodity, price: f64) -> Self {
        self.insert(commodity, price);
        self
    }

    /// Price for `commodity`, if the feed published one.
    #[must_use]
    pub fn get(&self, commodity: Commodity) -> Option<f64> {
        self.prices.get(&commodity).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Readings in commodity order.
    pub fn iter(&self) -> impl Iterator<Item = (Commodity, f64)> + '_ {
        self.prices.iter().map(|(c, p)| (*c, *p))
    }
}

impl FromIterator<(Commodity, f64)> for PriceSnapshot {
    fn from_iter<I: IntoIterator<Item = (Commodity, f64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (commodity, price) in iter {
            snapshot.insert(commodity, price);
        }
        snapshot
    }
}

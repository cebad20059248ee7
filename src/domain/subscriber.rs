//! Subscribers and their standing alert rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commodity::Commodity;
use super::id::{DeliveryAddress, SubscriberId};

/// Which side of the threshold triggers the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}' (expected 'above' or 'below')")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// A subscriber's standing condition on one commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub commodity: Commodity,
    pub direction: Direction,
    pub threshold: f64,
}

impl AlertRule {
    #[must_use]
    pub const fn new(commodity: Commodity, direction: Direction, threshold: f64) -> Self {
        Self {
            commodity,
            direction,
            threshold,
        }
    }

    #[must_use]
    pub const fn above(commodity: Commodity, threshold: f64) -> Self {
        Self::new(commodity, Direction::Above, threshold)
    }

    #[must_use]
    pub const fn below(commodity: Commodity, threshold: f64) -> Self {
        Self::new(commodity, Direction::Below, threshold)
    }
}

impl fmt::Display for AlertRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.commodity, self.direction, self.threshold)
    }
}

/// A directory record as seen by one poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub address: Option<DeliveryAddress>,
    pub rules: Vec<AlertRule>,
}

impl Subscriber {
    pub fn new(id: impl Into<SubscriberId>) -> Self {
        Self {
            id: id.into(),
            address: None,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<DeliveryAddress>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: AlertRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Address to deliver to, if this subscriber can receive alerts at all.
    ///
    /// Subscribers without a usable address or without rules are skipped
    /// before any rule is evaluated.
    #[must_use]
    pub fn deliverable_address(&self) -> Option<&DeliveryAddress> {
        if self.rules.is_empty() {
            return None;
        }
        self.address.as_ref().filter(|a| !a.is_blank())
    }
}

//! Monitored fuel grades.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A fuel grade published by the price feed.
///
/// Wire identifiers are the lowercase column names used by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commodity {
    Ron95,
    Ron97,
    Diesel,
    #[serde(rename = "diesel_eastmsia")]
    DieselEastMalaysia,
}

impl Commodity {
    /// Every grade the feed publishes, in display order.
    pub const ALL: [Self; 4] = [
        Self::Ron95,
        Self::Ron97,
        Self::Diesel,
        Self::DieselEastMalaysia,
    ];

    /// Identifier used by the feed and the directory.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ron95 => "ron95",
            Self::Ron97 => "ron97",
            Self::Diesel => "diesel",
            Self::DieselEastMalaysia => "diesel_eastmsia",
        }
    }

    /// Uppercased identifier shown in alert messages.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known commodity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown commodity '{0}'")]
pub struct UnknownCommodity(pub String);

impl FromStr for Commodity {
    type Err = UnknownCommodity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownCommodity(s.to_string()))
    }
}

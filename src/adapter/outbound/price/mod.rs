//! Price feed adapters.
//!
//! Implements the [`PriceSource`](crate::port::PriceSource) port over HTTP.

mod http;
mod payload;

pub use http::HttpPriceSource;
pub use payload::{parse_payload, PriceFeedFormat};

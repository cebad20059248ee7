//! Price source port.

use async_trait::async_trait;

use crate::domain::PriceSnapshot;
use crate::error::FetchError;

/// Gateway to the upstream price feed.
///
/// A commodity missing from the returned snapshot is routine missing data,
/// not an error. Implementations report transport and payload problems as
/// [`FetchError`]; the caller applies its own timeout on top.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the most recent reading for each known commodity.
    async fn fetch_latest(&self) -> Result<PriceSnapshot, FetchError>;

    /// Short name used in logs.
    fn source_name(&self) -> &'static str;
}

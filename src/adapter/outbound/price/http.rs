//! HTTP price feed client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::payload::{parse_payload, PriceFeedFormat};
use crate::domain::PriceSnapshot;
use crate::error::FetchError;
use crate::port::PriceSource;

/// Fetches the latest fuel prices from a JSON endpoint.
pub struct HttpPriceSource {
    client: Client,
    url: Url,
    format: PriceFeedFormat,
}

impl HttpPriceSource {
    /// Create a client for `url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client cannot be built.
    pub fn new(url: Url, format: PriceFeedFormat, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fuelwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url,
            format,
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_latest(&self) -> Result<PriceSnapshot, FetchError> {
        debug!(url = %self.url, "Fetching latest prices");

        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let snapshot = parse_payload(self.format, &body)?;

        debug!(readings = snapshot.len(), "Fetched prices");
        Ok(snapshot)
    }

    fn source_name(&self) -> &'static str {
        self.format.as_str()
    }
}

//! Handler for `prices`: one fetch, printed as a table.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::{Commodity, PriceSnapshot};
use crate::error::{FetchError, Result};
use crate::infrastructure::bootstrap::build_price_source;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Fuel")]
    fuel: String,
    #[tabled(rename = "Price (RM)")]
    price: String,
}

/// Fetch the latest snapshot and print it.
pub async fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path)?;
    let source = build_price_source(&config)?;
    let limit = config.poll.request_timeout();

    let snapshot = tokio::time::timeout(limit, source.fetch_latest())
        .await
        .map_err(|_| FetchError::Timeout(limit))??;
    if snapshot.is_empty() {
        return Err(FetchError::EmptyPayload.into());
    }

    if output::is_json() {
        let prices: serde_json::Map<String, serde_json::Value> = snapshot
            .iter()
            .map(|(commodity, price)| (commodity.as_str().to_string(), json!(price)))
            .collect();
        output::json_output(json!({
            "command": "prices",
            "source": source.source_name(),
            "prices": prices,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Source", &config.price_source.url);
    output::section("Latest prices");
    output::lines(&Table::new(rows(&snapshot)).to_string());

    Ok(())
}

fn rows(snapshot: &PriceSnapshot) -> Vec<PriceRow> {
    Commodity::ALL
        .iter()
        .map(|commodity| PriceRow {
            fuel: commodity.label(),
            price: snapshot
                .get(*commodity)
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:.2}")),
        })
        .collect()
}

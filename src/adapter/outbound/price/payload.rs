//! Decoding of price feed payloads into snapshots.
//!
//! Two shapes are understood:
//!
//! - `level_data`: the caching proxy's envelope, `{"levelData": [row, ...]}`
//!   sorted oldest first. The last row is the latest reading.
//! - `data_catalogue`: the raw catalogue feed, a bare array mixing
//!   `series_type = "level"` rows with weekly change rows in no particular
//!   order. The level row with the latest `date` is the reading.
//!
//! Per-commodity fields may be numbers or numeric strings. Missing, null or
//! unparsable fields are missing data for that commodity only.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Commodity, PriceSnapshot};
use crate::error::FetchError;

/// Shape of the feed behind the configured URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFeedFormat {
    #[default]
    LevelData,
    DataCatalogue,
}

impl PriceFeedFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LevelData => "level_data",
            Self::DataCatalogue => "data_catalogue",
        }
    }
}

type Row = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct LevelDataEnvelope {
    #[serde(rename = "levelData", default)]
    level_data: Vec<Row>,
}

/// Decode a raw response body into a non-empty snapshot.
///
/// # Errors
///
/// [`FetchError::Malformed`] when the body is not the expected JSON shape,
/// [`FetchError::EmptyPayload`] when it holds no usable reading.
pub fn parse_payload(format: PriceFeedFormat, body: &[u8]) -> Result<PriceSnapshot, FetchError> {
    let latest = match format {
        PriceFeedFormat::LevelData => latest_level_data_row(body)?,
        PriceFeedFormat::DataCatalogue => latest_catalogue_row(body)?,
    };

    let snapshot = snapshot_from_row(&latest);
    if snapshot.is_empty() {
        return Err(FetchError::EmptyPayload);
    }
    Ok(snapshot)
}

fn latest_level_data_row(body: &[u8]) -> Result<Row, FetchError> {
    let envelope: LevelDataEnvelope =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    envelope
        .level_data
        .into_iter()
        .last()
        .ok_or(FetchError::EmptyPayload)
}

fn latest_catalogue_row(body: &[u8]) -> Result<Row, FetchError> {
    let rows: Vec<Row> =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    rows.into_iter()
        .filter(|row| row.get("series_type").and_then(Value::as_str) == Some("level"))
        .filter_map(|row| row_date(&row).map(|date| (date, row)))
        .max_by_key(|(date, _)| *date)
        .map(|(_, row)| row)
        .ok_or(FetchError::EmptyPayload)
}

fn row_date(row: &Row) -> Option<NaiveDate> {
    let raw = row.get("date")?.as_str()?;
    // Feed dates are plain days, sometimes with a time suffix.
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn snapshot_from_row(row: &Row) -> PriceSnapshot {
    Commodity::ALL
        .into_iter()
        .filter_map(|commodity| {
            row.get(commodity.as_str())
                .and_then(price_value)
                .map(|price| (commodity, price))
        })
        .collect()
}

fn price_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_data_takes_last_row() {
        let body = br#"{"levelData": [
            {"date": "2025-01-02", "ron95": 2.05, "ron97": 3.47, "diesel": 2.15, "diesel_eastmsia": 2.15},
            {"date": "2025-01-09", "ron95": 2.05, "ron97": 3.45, "diesel": 2.13, "diesel_eastmsia": 2.15}
        ], "changeData": []}"#;

        let snapshot = parse_payload(PriceFeedFormat::LevelData, body).unwrap();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.get(Commodity::Ron97), Some(3.45));
        assert_eq!(snapshot.get(Commodity::Diesel), Some(2.13));
    }

    #[test]
    fn level_data_missing_field_is_missing_commodity() {
        let body = br#"{"levelData": [{"date": "2025-01-09", "ron95": 2.05, "ron97": null}]}"#;
        let snapshot = parse_payload(PriceFeedFormat::LevelData, body).unwrap();
        assert_eq!(snapshot.get(Commodity::Ron95), Some(2.05));
        assert_eq!(snapshot.get(Commodity::Ron97), None);
        assert_eq!(snapshot.get(Commodity::Diesel), None);
    }

    #[test]
    fn level_data_accepts_numeric_strings() {
        let body = br#"{"levelData": [{"ron95": "2.05", "diesel": "n/a"}]}"#;
        let snapshot = parse_payload(PriceFeedFormat::LevelData, body).unwrap();
        assert_eq!(snapshot.get(Commodity::Ron95), Some(2.05));
        assert_eq!(snapshot.get(Commodity::Diesel), None);
    }

    #[test]
    fn level_data_empty_is_empty_payload() {
        let err = parse_payload(PriceFeedFormat::LevelData, br#"{"levelData": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::EmptyPayload));

        let err = parse_payload(PriceFeedFormat::LevelData, br#"{}"#).unwrap_err();
        assert!(matches!(err, FetchError::EmptyPayload));
    }

    #[test]
    fn row_without_known_fuel_is_empty_payload() {
        let body = br#"{"levelData": [{"date": "2025-01-09", "kerosene": 1.0}]}"#;
        let err = parse_payload(PriceFeedFormat::LevelData, body).unwrap_err();
        assert!(matches!(err, FetchError::EmptyPayload));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_payload(PriceFeedFormat::LevelData, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));

        let err = parse_payload(PriceFeedFormat::DataCatalogue, br#"{"levelData": []}"#)
            .unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn catalogue_picks_latest_level_row() {
        let body = br#"[
            {"date": "2025-01-09", "series_type": "change_weekly", "ron95": 0.0, "ron97": -0.02},
            {"date": "2025-01-09", "series_type": "level", "ron95": 2.05, "ron97": 3.45},
            {"date": "2025-01-02", "series_type": "level", "ron95": 2.05, "ron97": 3.47},
            {"series_type": "level", "ron95": 9.99}
        ]"#;

        let snapshot = parse_payload(PriceFeedFormat::DataCatalogue, body).unwrap();
        assert_eq!(snapshot.get(Commodity::Ron97), Some(3.45));
        assert_eq!(snapshot.get(Commodity::Ron95), Some(2.05));
    }

    #[test]
    fn catalogue_without_level_rows_is_empty_payload() {
        let body = br#"[{"date": "2025-01-09", "series_type": "change_weekly", "ron95": 0.0}]"#;
        let err = parse_payload(PriceFeedFormat::DataCatalogue, body).unwrap_err();
        assert!(matches!(err, FetchError::EmptyPayload));
    }

    #[test]
    fn catalogue_accepts_timestamp_dates() {
        let body = br#"[
            {"date": "2025-01-09T00:00:00", "series_type": "level", "ron95": 2.10},
            {"date": "2025-01-02T00:00:00", "series_type": "level", "ron95": 2.05}
        ]"#;
        let snapshot = parse_payload(PriceFeedFormat::DataCatalogue, body).unwrap();
        assert_eq!(snapshot.get(Commodity::Ron95), Some(2.10));
    }
}

//! Alpha Vantage JSON payloads to raw price tables

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

use crate::models::request::Interval;
use crate::models::series::RawPriceTable;
use crate::services::error::DataSourceError;

pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

pub fn intraday_series_key(interval: Interval) -> String {
    format!("Time Series ({})", interval)
}

/// Map the provider's in-band error objects to typed errors.
///
/// Alpha Vantage answers HTTP 200 for bad symbols and throttling.
pub fn check_error_payload(payload: &Value, symbol: &str) -> Result<(), DataSourceError> {
    if let Some(message) = payload.get("Error Message").and_then(Value::as_str) {
        return Err(DataSourceError::UnknownSymbol {
            symbol: symbol.to_string(),
            message: message.to_string(),
        });
    }
    for key in ["Note", "Information"] {
        if let Some(message) = payload.get(key).and_then(Value::as_str) {
            return Err(DataSourceError::Provider(message.to_string()));
        }
    }
    Ok(())
}

/// Parse `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (taken as midnight)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DataSourceError> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DataSourceError::MalformedPayload(format!("bad timestamp '{}'", raw)))
}

/// Values come as decimal strings; anything unparseable counts as missing.
fn parse_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Extract the time series under `series_key` into a raw table
pub fn parse_time_series(payload: &Value, series_key: &str) -> Result<RawPriceTable, DataSourceError> {
    let series = payload
        .get(series_key)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            DataSourceError::MalformedPayload(format!("missing object '{}'", series_key))
        })?;

    let mut table = RawPriceTable::new();
    for (timestamp, fields) in series {
        let fields = fields.as_object().ok_or_else(|| {
            DataSourceError::MalformedPayload(format!("bar at '{}' is not an object", timestamp))
        })?;
        let values: HashMap<String, Option<f64>> = fields
            .iter()
            .map(|(name, value)| (name.clone(), parse_value(value)))
            .collect();
        table.push_row(parse_timestamp(timestamp)?, values);
    }
    Ok(table)
}

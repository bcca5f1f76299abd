//! Raw price tables to validated price series
//!
//! Column lookup is a case-insensitive substring match, so provider keys
//! such as "4. close" or "Adj Close" resolve to the canonical field. When
//! several columns match, the first in table order wins.

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::models::series::{PriceBar, PriceSeries, RawPriceTable, RawRow};

pub const CLOSE_FIELD: &str = "close";
pub const OPEN_FIELD: &str = "open";
pub const HIGH_FIELD: &str = "high";
pub const LOW_FIELD: &str = "low";
pub const VOLUME_FIELD: &str = "volume";

/// Index of the first column whose lowercased name contains `needle`
pub fn find_column(columns: &[String], needle: &str) -> Option<usize> {
    let needle = needle.to_lowercase();
    columns
        .iter()
        .position(|c| c.to_lowercase().contains(&needle))
}

/// Normalize a raw table into a [`PriceSeries`].
///
/// 1. Locate the close column, or fail with `MissingField`.
/// 2. Order rows by timestamp; duplicate timestamps fail with `MalformedInput`.
/// 3. Forward-fill every column from its latest observed value.
/// 4. Drop rows that still have a gap (only before a column's first value).
pub fn normalize(table: &RawPriceTable) -> Result<PriceSeries, IndicatorError> {
    let columns = table.columns();
    let close_idx = find_column(columns, CLOSE_FIELD)
        .ok_or_else(|| IndicatorError::MissingField(CLOSE_FIELD.to_string()))?;
    let open_idx = find_column(columns, OPEN_FIELD);
    let high_idx = find_column(columns, HIGH_FIELD);
    let low_idx = find_column(columns, LOW_FIELD);
    let volume_idx = find_column(columns, VOLUME_FIELD);

    let rows = ordered_rows(table)?;

    let mut latest: Vec<Option<f64>> = vec![None; columns.len()];
    let mut bars = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in rows {
        for (idx, column) in columns.iter().enumerate() {
            let observed = row
                .values
                .get(column)
                .copied()
                .flatten()
                .filter(|v| v.is_finite());
            if observed.is_some() {
                latest[idx] = observed;
            }
        }

        if latest.iter().any(Option::is_none) {
            dropped += 1;
            continue;
        }
        let Some(close) = latest[close_idx] else {
            dropped += 1;
            continue;
        };

        let field = |idx: Option<usize>| idx.and_then(|i| latest[i]);
        bars.push(PriceBar {
            timestamp: row.timestamp,
            close,
            open: field(open_idx),
            high: field(high_idx),
            low: field(low_idx),
            volume: field(volume_idx),
        });
    }

    debug!(
        close_column = %columns[close_idx],
        rows = table.len(),
        kept = bars.len(),
        dropped = dropped,
        "Normalized raw price table"
    );

    PriceSeries::new(bars)
}

fn ordered_rows(table: &RawPriceTable) -> Result<Vec<&RawRow>, IndicatorError> {
    let mut rows: Vec<&RawRow> = table.rows().iter().collect();
    let sorted = rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp);
    if !sorted {
        rows.sort_by_key(|r| r.timestamp);
    }
    if let Some(pair) = rows.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
        return Err(IndicatorError::MalformedInput(format!(
            "duplicate timestamp {}",
            pair[0].timestamp
        )));
    }
    Ok(rows)
}

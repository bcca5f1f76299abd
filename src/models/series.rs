use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::indicators::error::IndicatorError;

/// A single OHLC(V) bar. Only `close` is required by the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume: Option<f64>,
}

impl PriceBar {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }

    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Price bars in strictly ascending timestamp order with finite closes.
///
/// The only way to build one is through [`PriceSeries::new`] (or serde,
/// which goes through the same check), so every instance holds the ordering
/// invariant. Out-of-order or duplicate input is rejected, never repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, IndicatorError> {
        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() {
                return Err(IndicatorError::MalformedInput(format!(
                    "non-finite close {} at {}",
                    bar.close, bar.timestamp
                )));
            }
            if i > 0 {
                let prev = bars[i - 1].timestamp;
                if bar.timestamp == prev {
                    return Err(IndicatorError::MalformedInput(format!(
                        "duplicate timestamp {}",
                        bar.timestamp
                    )));
                }
                if bar.timestamp < prev {
                    return Err(IndicatorError::MalformedInput(format!(
                        "timestamp {} follows later timestamp {}",
                        bar.timestamp, prev
                    )));
                }
            }
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Restartable iteration over the bars, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = IndicatorError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// One unnormalized row: column name to value, `None` where missing
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub timestamp: DateTime<Utc>,
    pub values: HashMap<String, Option<f64>>,
}

/// Tabular price record as delivered by a data source.
///
/// Rows may arrive in any order and may have gaps. Column order is the
/// order in which names were first seen and decides which column wins
/// when several match a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPriceTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with an explicit column order
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Column names not seen before are registered in
    /// lexicographic order, which keeps numbered provider keys
    /// ("1. open", "2. high", ...) in their natural order.
    pub fn push_row(&mut self, timestamp: DateTime<Utc>, values: HashMap<String, Option<f64>>) {
        let mut unseen: Vec<&String> = values
            .keys()
            .filter(|k| !self.columns.contains(k))
            .collect();
        unseen.sort();
        let unseen: Vec<String> = unseen.into_iter().cloned().collect();
        self.columns.extend(unseen);
        self.rows.push(RawRow { timestamp, values });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows whose timestamp satisfies `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&DateTime<Utc>) -> bool) {
        self.rows.retain(|row| keep(&row.timestamp));
    }
}

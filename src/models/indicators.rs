use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MA_WINDOW: usize = 10;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BOLLINGER_WINDOW: usize = 10;
pub const DEFAULT_BOLLINGER_K: f64 = 2.0;

/// Lookback settings for the indicator pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub ma_window: usize,
    pub rsi_period: usize,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_window: DEFAULT_MA_WINDOW,
            rsi_period: DEFAULT_RSI_PERIOD,
            bollinger_window: DEFAULT_BOLLINGER_WINDOW,
            bollinger_k: DEFAULT_BOLLINGER_K,
        }
    }
}

impl IndicatorParams {
    pub fn with_ma_window(mut self, window: usize) -> Self {
        self.ma_window = window;
        self
    }

    pub fn with_rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = period;
        self
    }

    pub fn with_bollinger(mut self, window: usize, k: f64) -> Self {
        self.bollinger_window = window;
        self.bollinger_k = k;
        self
    }
}

/// Bollinger envelope at a single index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub middle: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Derived values for one bar. `None` marks insufficient history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: DateTime<Utc>,
    pub rolling_ma: Option<f64>,
    pub rsi: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
}

/// Indicator values aligned one-to-one with a [`PriceSeries`](super::PriceSeries)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn new(points: Vec<IndicatorPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorPoint> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorPoint> {
        self.points.get(index)
    }

    pub fn rolling_ma(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.rolling_ma).collect()
    }

    pub fn rsi(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.rsi).collect()
    }

    pub fn upper_band(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.upper_band).collect()
    }

    pub fn lower_band(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.lower_band).collect()
    }

    /// Most recent point, if any
    pub fn latest(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }
}

impl<'a> IntoIterator for &'a IndicatorSeries {
    type Item = &'a IndicatorPoint;
    type IntoIter = std::slice::Iter<'a, IndicatorPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

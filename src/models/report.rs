use serde::{Deserialize, Serialize};

use super::indicators::{IndicatorParams, IndicatorPoint, IndicatorSeries};
use super::request::RetrievalMode;
use super::series::{PriceBar, PriceSeries};

/// A retrieved series together with the indicators derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub mode: RetrievalMode,
    pub params: IndicatorParams,
    pub series: PriceSeries,
    pub indicators: IndicatorSeries,
}

impl AnalysisReport {
    /// Bars paired with their indicator points, oldest first.
    ///
    /// Each call starts over from the first bar.
    pub fn rows(&self) -> impl Iterator<Item = (&PriceBar, &IndicatorPoint)> + '_ {
        self.series.iter().zip(self.indicators.iter())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

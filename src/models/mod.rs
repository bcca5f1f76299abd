//! Shared data models spanning retrieval, indicators and presentation.

pub mod indicators;
pub mod report;
pub mod request;
pub mod series;

pub use indicators::{BollingerBand, IndicatorParams, IndicatorPoint, IndicatorSeries};
pub use report::AnalysisReport;
pub use request::{Interval, PriceRequest, RetrievalMode};
pub use series::{PriceBar, PriceSeries, RawPriceTable, RawRow};

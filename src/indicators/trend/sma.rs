//! Rolling (simple) moving average

use crate::common::math;
use crate::models::series::PriceSeries;

/// Trailing arithmetic mean of close over `window` bars.
///
/// Aligned to the series: the first `window - 1` entries are `None`.
pub fn calculate_rolling_ma(series: &PriceSeries, window: usize) -> Vec<Option<f64>> {
    math::rolling_mean(&series.closes(), window)
}

/// Rolling moving average with the default window (10)
pub fn calculate_rolling_ma_default(series: &PriceSeries) -> Vec<Option<f64>> {
    calculate_rolling_ma(series, crate::models::indicators::DEFAULT_MA_WINDOW)
}

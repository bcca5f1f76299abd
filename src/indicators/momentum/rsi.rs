//! RSI (Relative Strength Index) indicator

use crate::common::math::{self, RollingWindow};
use crate::models::indicators::DEFAULT_RSI_PERIOD;
use crate::models::series::PriceSeries;

/// RSI from simple rolling averages of gains and losses.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss
///
/// Index 0 has no delta, so the first value appears at index `period`.
/// No losses with some gains gives 100; a window with neither gains nor
/// losses has no defined RSI and yields `None`.
pub fn calculate_rsi(series: &PriceSeries, period: usize) -> Vec<Option<f64>> {
    let closes = series.closes();
    let mut gains = RollingWindow::new(period);
    let mut losses = RollingWindow::new(period);

    math::diff(&closes)
        .into_iter()
        .map(|delta| {
            let delta = delta?;
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
            rsi_from_averages(gains.mean()?, losses.mean()?)
        })
        .collect()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(series: &PriceSeries) -> Vec<Option<f64>> {
    calculate_rsi(series, DEFAULT_RSI_PERIOD)
}

pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return None;
    }
    if avg_loss <= 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }
    let rs = avg_gain.max(0.0) / avg_loss;
    Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}

//! Bollinger Bands indicator

use crate::common::math::RollingWindow;
use crate::models::indicators::{BollingerBand, DEFAULT_BOLLINGER_K, DEFAULT_BOLLINGER_WINDOW};
use crate::models::series::PriceSeries;

/// Calculate Bollinger Bands over a trailing window
///
/// Middle Band = SMA(window)
/// Upper Band = Middle + (k * sample standard deviation)
/// Lower Band = Middle - (k * sample standard deviation)
pub fn calculate_bollinger_bands(
    series: &PriceSeries,
    window: usize,
    k: f64,
) -> Vec<Option<BollingerBand>> {
    let mut rolling = RollingWindow::new(window);
    series
        .iter()
        .map(|bar| {
            rolling.push(bar.close);
            let middle = rolling.mean()?;
            let std_dev = rolling.sample_std_dev()?;
            let upper = middle + k * std_dev;
            let lower = middle - k * std_dev;
            if !upper.is_finite() || !lower.is_finite() {
                return None;
            }
            Some(BollingerBand {
                middle,
                std_dev,
                upper,
                lower,
            })
        })
        .collect()
}

/// Calculate Bollinger Bands with default parameters (10 SMA, 2σ)
pub fn calculate_bollinger_bands_default(series: &PriceSeries) -> Vec<Option<BollingerBand>> {
    calculate_bollinger_bands(series, DEFAULT_BOLLINGER_WINDOW, DEFAULT_BOLLINGER_K)
}

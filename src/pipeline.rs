//! Indicator pipeline: normalized series in, aligned indicators out.
//!
//! The pipeline holds only its validated parameters; every run is a pure
//! function of its input.

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_rsi;
use crate::indicators::normalizer::normalize;
use crate::indicators::trend::calculate_rolling_ma;
use crate::indicators::validation::validate_params;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::{IndicatorParams, IndicatorPoint, IndicatorSeries};
use crate::models::series::{PriceSeries, RawPriceTable};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPipeline {
    params: IndicatorParams,
}

impl IndicatorPipeline {
    pub fn new(params: IndicatorParams) -> Result<Self, IndicatorError> {
        validate_params(&params)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Derive all indicators for `series`
    pub fn run(&self, series: &PriceSeries) -> IndicatorSeries {
        let rolling_ma = calculate_rolling_ma(series, self.params.ma_window);
        let rsi = calculate_rsi(series, self.params.rsi_period);
        let bands = calculate_bollinger_bands(
            series,
            self.params.bollinger_window,
            self.params.bollinger_k,
        );

        let points: Vec<IndicatorPoint> = series
            .iter()
            .zip(rolling_ma)
            .zip(rsi)
            .zip(bands)
            .map(|(((bar, rolling_ma), rsi), band)| IndicatorPoint {
                timestamp: bar.timestamp,
                rolling_ma,
                rsi,
                upper_band: band.map(|b| b.upper),
                lower_band: band.map(|b| b.lower),
            })
            .collect();

        debug!(
            bars = series.len(),
            ma_window = self.params.ma_window,
            rsi_period = self.params.rsi_period,
            bollinger_window = self.params.bollinger_window,
            "Derived indicator series"
        );

        IndicatorSeries::new(points)
    }

    /// Normalize a raw table, then derive indicators.
    ///
    /// Nothing is returned if normalization fails.
    pub fn run_raw(
        &self,
        table: &RawPriceTable,
    ) -> Result<(PriceSeries, IndicatorSeries), IndicatorError> {
        let series = normalize(table)?;
        let indicators = self.run(&series);
        Ok((series, indicators))
    }
}

impl Default for IndicatorPipeline {
    fn default() -> Self {
        Self {
            params: IndicatorParams::default(),
        }
    }
}

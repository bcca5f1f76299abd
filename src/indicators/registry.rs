//! Indicator registry and trait system

use crate::models::indicators::IndicatorParams;

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
}

/// Trait for all indicators
pub trait Indicator {
    /// Get the category this indicator belongs to
    fn category(&self) -> IndicatorCategory;

    /// Get the name of the indicator
    fn name(&self) -> &'static str;

    /// Number of leading bars that stay `None` under `params`
    fn warmup(&self, params: &IndicatorParams) -> usize;
}

/// The indicators produced by the pipeline, in output column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    RollingMa,
    Rsi,
    UpperBand,
    LowerBand,
}

impl Indicator for IndicatorKind {
    fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::RollingMa => IndicatorCategory::Trend,
            IndicatorKind::Rsi => IndicatorCategory::Momentum,
            IndicatorKind::UpperBand | IndicatorKind::LowerBand => IndicatorCategory::Volatility,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            IndicatorKind::RollingMa => "rolling_ma",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::UpperBand => "upper_band",
            IndicatorKind::LowerBand => "lower_band",
        }
    }

    fn warmup(&self, params: &IndicatorParams) -> usize {
        match self {
            IndicatorKind::RollingMa => params.ma_window.saturating_sub(1),
            // one bar lost to differencing, period - 1 more to the average
            IndicatorKind::Rsi => params.rsi_period,
            IndicatorKind::UpperBand | IndicatorKind::LowerBand => {
                params.bollinger_window.saturating_sub(1)
            }
        }
    }
}

/// Indicator registry for organizing indicators by category
pub struct IndicatorRegistry {
    kinds: Vec<IndicatorKind>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self {
            kinds: Self::all_kinds(),
        }
    }

    pub fn all_kinds() -> Vec<IndicatorKind> {
        vec![
            IndicatorKind::RollingMa,
            IndicatorKind::Rsi,
            IndicatorKind::UpperBand,
            IndicatorKind::LowerBand,
        ]
    }

    pub fn kinds(&self) -> &[IndicatorKind] {
        &self.kinds
    }

    pub fn by_category(&self, category: IndicatorCategory) -> Vec<IndicatorKind> {
        self.kinds
            .iter()
            .copied()
            .filter(|k| k.category() == category)
            .collect()
    }

    /// Column names in output order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(|k| k.name()).collect()
    }

    /// Longest warm-up across all indicators
    pub fn max_warmup(&self, params: &IndicatorParams) -> usize {
        self.kinds
            .iter()
            .map(|k| k.warmup(params))
            .max()
            .unwrap_or(0)
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

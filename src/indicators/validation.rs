use crate::indicators::error::IndicatorError;
use crate::models::indicators::IndicatorParams;

pub fn validate_window(name: &'static str, value: usize, min: usize) -> Result<(), IndicatorError> {
    if value < min {
        return Err(IndicatorError::InvalidParameter {
            name,
            reason: format!("must be at least {}, got {}", min, value),
        });
    }
    Ok(())
}

pub fn validate_multiplier(name: &'static str, value: f64) -> Result<(), IndicatorError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(IndicatorError::InvalidParameter {
            name,
            reason: format!("must be a positive finite number, got {}", value),
        });
    }
    Ok(())
}

/// Bollinger bands use a sample standard deviation, so their window is at least 2
pub fn validate_params(params: &IndicatorParams) -> Result<(), IndicatorError> {
    validate_window("ma_window", params.ma_window, 1)?;
    validate_window("rsi_period", params.rsi_period, 1)?;
    validate_window("bollinger_window", params.bollinger_window, 2)?;
    validate_multiplier("bollinger_k", params.bollinger_k)?;
    Ok(())
}

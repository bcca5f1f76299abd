//! Indicator pipeline errors

/// Failures of the indicator pipeline itself.
///
/// Short histories are not errors: they surface as `None` values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndicatorError {
    #[error("Missing field: no column matching '{0}'")]
    MissingField(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

//! Retrieval and service-level errors

use crate::indicators::error::IndicatorError;

/// Failures of the data source. Kept apart from computation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataSourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown symbol '{symbol}': {message}")]
    UnknownSymbol { symbol: String, message: String },

    #[error("Provider notice: {0}")]
    Provider(String),

    /// The provider answered but had no bars for the request
    #[error("No price data for '{symbol}': {reason}")]
    NoData { symbol: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors surfaced by the fetch-and-derive service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

//! Trend indicators: rolling moving average

pub mod sma;

pub use sma::*;

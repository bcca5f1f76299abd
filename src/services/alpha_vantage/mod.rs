//! Alpha Vantage REST data source

pub mod parser;
pub mod provider;

pub use provider::AlphaVantageProvider;

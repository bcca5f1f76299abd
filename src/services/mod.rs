//! Data sources and the fetch-and-derive service

pub mod alpha_vantage;
pub mod analysis;
pub mod error;
pub mod market_data;

pub use analysis::AnalysisService;
pub use error::{DataSourceError, ServiceError};
pub use market_data::{MarketDataProvider, StaticMarketDataProvider};

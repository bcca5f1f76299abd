//! Market data provider interface

use std::collections::HashMap;

use crate::models::request::PriceRequest;
use crate::models::series::RawPriceTable;
use crate::services::error::DataSourceError;

/// A source of raw price tables.
///
/// Implementations do I/O and parsing only; normalization and indicator
/// derivation happen downstream and are identical for every source.
#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Fetch the raw table for `request`; an empty result is `NoData`, never `Ok`
    async fn get_price_table(&self, request: &PriceRequest)
        -> Result<RawPriceTable, DataSourceError>;
}

/// Provider serving preloaded tables, keyed by upper-cased symbol.
///
/// Useful for offline runs and tests. The retrieval mode is ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    tables: HashMap<String, RawPriceTable>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, symbol: &str, table: RawPriceTable) -> Self {
        self.tables.insert(symbol.to_uppercase(), table);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn get_price_table(
        &self,
        request: &PriceRequest,
    ) -> Result<RawPriceTable, DataSourceError> {
        let table = self
            .tables
            .get(&request.symbol.to_uppercase())
            .ok_or_else(|| DataSourceError::UnknownSymbol {
                symbol: request.symbol.clone(),
                message: "no table loaded for symbol".to_string(),
            })?;
        if table.is_empty() {
            return Err(DataSourceError::NoData {
                symbol: request.symbol.clone(),
                reason: "loaded table has no rows".to_string(),
            });
        }
        Ok(table.clone())
    }
}

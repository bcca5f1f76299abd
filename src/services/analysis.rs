//! Fetch a series and derive its indicators

use std::sync::Arc;
use tracing::info;

use crate::models::indicators::IndicatorParams;
use crate::models::report::AnalysisReport;
use crate::models::request::PriceRequest;
use crate::pipeline::IndicatorPipeline;
use crate::services::error::ServiceError;
use crate::services::market_data::MarketDataProvider;

/// Glue between a data source and the indicator pipeline.
///
/// The provider is the only stateful collaborator; every call builds its
/// own pipeline from the requested parameters.
#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn analyze(
        &self,
        request: &PriceRequest,
        params: IndicatorParams,
    ) -> Result<AnalysisReport, ServiceError> {
        // Bad parameters fail before any network round trip
        let pipeline = IndicatorPipeline::new(params)?;
        let table = self.provider.get_price_table(request).await?;
        let (series, indicators) = pipeline.run_raw(&table)?;

        info!(
            symbol = %request.symbol,
            provider = self.provider.name(),
            bars = series.len(),
            "Derived indicators for {}",
            request.symbol
        );

        Ok(AnalysisReport {
            symbol: request.symbol.clone(),
            mode: request.mode,
            params: *pipeline.params(),
            series,
            indicators,
        })
    }
}

//! Alpha Vantage market data provider implementation

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::parser::{check_error_payload, intraday_series_key, parse_time_series, DAILY_SERIES_KEY};
use crate::config::ProviderConfig;
use crate::models::request::{PriceRequest, RetrievalMode};
use crate::models::series::RawPriceTable;
use crate::services::error::DataSourceError;
use crate::services::market_data::MarketDataProvider;

const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";
const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY_ADJUSTED";

/// Error text without the request URL, which carries the API key
fn describe(err: reqwest::Error) -> String {
    err.without_url().to_string()
}

pub struct AlphaVantageProvider {
    config: ProviderConfig,
    client: Client,
}

impl AlphaVantageProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: ProviderConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/query", self.config.base_url.as_str().trim_end_matches('/'))
    }

    async fn fetch_json(&self, query: &[(&str, &str)]) -> Result<Value, DataSourceError> {
        let mut params: Vec<(&str, &str)> = query.to_vec();
        params.push(("apikey", self.config.api_key.as_str()));

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| DataSourceError::Network(describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataSourceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DataSourceError::MalformedPayload(describe(e)))
    }

    async fn fetch_table(
        &self,
        symbol: &str,
        mode: RetrievalMode,
    ) -> Result<RawPriceTable, DataSourceError> {
        match mode {
            RetrievalMode::Intraday { interval } => {
                let payload = self
                    .fetch_json(&[
                        ("function", INTRADAY_FUNCTION),
                        ("symbol", symbol),
                        ("interval", interval.as_str()),
                    ])
                    .await?;
                check_error_payload(&payload, symbol)?;
                let table = parse_time_series(&payload, &intraday_series_key(interval))?;
                if table.is_empty() {
                    return Err(DataSourceError::NoData {
                        symbol: symbol.to_string(),
                        reason: format!("empty {} intraday series", interval),
                    });
                }
                Ok(table)
            }
            RetrievalMode::Historical { start, end } => {
                if start > end {
                    return Err(DataSourceError::InvalidRequest(format!(
                        "start date {} is after end date {}",
                        start, end
                    )));
                }
                let payload = self
                    .fetch_json(&[
                        ("function", DAILY_FUNCTION),
                        ("symbol", symbol),
                        ("outputsize", "full"),
                    ])
                    .await?;
                check_error_payload(&payload, symbol)?;
                let mut table = parse_time_series(&payload, DAILY_SERIES_KEY)?;
                table.retain(|ts| {
                    let day = ts.date_naive();
                    day >= start && day <= end
                });
                if table.is_empty() {
                    return Err(DataSourceError::NoData {
                        symbol: symbol.to_string(),
                        reason: format!("no daily bars between {} and {}", start, end),
                    });
                }
                Ok(table)
            }
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn get_price_table(
        &self,
        request: &PriceRequest,
    ) -> Result<RawPriceTable, DataSourceError> {
        let symbol = request.symbol.trim();
        if symbol.is_empty() {
            return Err(DataSourceError::InvalidRequest("symbol is empty".to_string()));
        }

        info!(symbol = %symbol, mode = %request.mode.label(), "Requesting price series");

        let result = self.fetch_table(symbol, request.mode).await;
        match &result {
            Ok(table) => debug!(symbol = %symbol, rows = table.len(), "Parsed price table"),
            Err(e) => warn!(symbol = %symbol, error = %e, "Price retrieval failed"),
        }
        result
    }
}

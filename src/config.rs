//! Environment-driven configuration

use std::env;
use url::Url;

pub const DEFAULT_ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Deployment environment name (`ENVIRONMENT`, defaults to "development")
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Connection settings for the Alpha Vantage data source
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: Url,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            name: "ALPHA_VANTAGE_BASE_URL",
            reason: e.to_string(),
        })?;
        Ok(Self {
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Read `ALPHA_VANTAGE_API_KEY` (required) and `ALPHA_VANTAGE_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("ALPHA_VANTAGE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ALPHA_VANTAGE_API_KEY"))?;
        let base_url = env::var("ALPHA_VANTAGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ALPHA_VANTAGE_URL.to_string());
        Self::new(api_key, &base_url)
    }
}

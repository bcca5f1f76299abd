//! Alpha Vantage provider against a mocked endpoint

use chrono::NaiveDate;
use marketlens::config::ProviderConfig;
use marketlens::indicators::{normalize, IndicatorError};
use marketlens::models::indicators::IndicatorParams;
use marketlens::models::request::{Interval, PriceRequest};
use marketlens::services::alpha_vantage::AlphaVantageProvider;
use marketlens::services::{AnalysisService, DataSourceError, MarketDataProvider, ServiceError};
use std::sync::Arc;

use crate::test_utils::{provider_for, start_mock_alpha_vantage, DAILY_BARS, INTRADAY_BARS};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[tokio::test]
async fn intraday_table_parses_every_bar() {
    let server = start_mock_alpha_vantage().await;
    let provider = provider_for(&server);

    let table = provider
        .get_price_table(&PriceRequest::intraday("IBM", Interval::FiveMinutes))
        .await
        .expect("intraday fetch succeeds");

    assert_eq!(table.len(), INTRADAY_BARS);
    assert_eq!(
        table.columns(),
        &["1. open", "2. high", "3. low", "4. close", "5. volume"]
    );
}

#[tokio::test]
async fn intraday_gap_is_forward_filled() {
    let server = start_mock_alpha_vantage().await;
    let table = provider_for(&server)
        .get_price_table(&PriceRequest::intraday("IBM", Interval::FiveMinutes))
        .await
        .unwrap();

    let series = normalize(&table).unwrap();
    let closes = series.closes();
    assert_eq!(series.len(), INTRADAY_BARS);
    assert_eq!(closes[4], 104.0);
    assert_eq!(closes[5], 104.0);
    assert_eq!(closes[6], 106.0);
    assert_eq!(series.first().unwrap().open, Some(99.5));
    assert_eq!(series.first().unwrap().volume, Some(1500.0));
}

#[tokio::test]
async fn historical_range_is_inclusive() {
    let server = start_mock_alpha_vantage().await;
    let table = provider_for(&server)
        .get_price_table(&PriceRequest::historical("IBM", date(5), date(20)))
        .await
        .unwrap();

    let series = normalize(&table).unwrap();
    assert_eq!(series.len(), 16);
    assert_eq!(series.first().unwrap().timestamp.date_naive(), date(5));
    assert_eq!(series.last().unwrap().timestamp.date_naive(), date(20));
    // "4. close" precedes "5. adjusted close"
    assert_eq!(series.closes()[0], 155.0);
}

#[tokio::test]
async fn historical_full_month() {
    let server = start_mock_alpha_vantage().await;
    let table = provider_for(&server)
        .get_price_table(&PriceRequest::historical("IBM", date(1), date(31)))
        .await
        .unwrap();
    assert_eq!(table.len(), DAILY_BARS);
}

#[tokio::test]
async fn inverted_date_range_is_rejected_before_fetching() {
    let server = start_mock_alpha_vantage().await;
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::historical("IBM", date(20), date(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::InvalidRequest(_)));

    let requests = server.received_requests().await.expect("wiremock requests");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn unknown_symbol_is_a_distinct_error() {
    let server = start_mock_alpha_vantage().await;
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::intraday("NOPE", Interval::FiveMinutes))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::UnknownSymbol { ref symbol, .. } if symbol == "NOPE"));
}

#[tokio::test]
async fn rate_limit_note_is_a_provider_error() {
    let server = start_mock_alpha_vantage().await;
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::intraday("THROTTLE", Interval::FiveMinutes))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::Provider(_)));
}

#[tokio::test]
async fn missing_series_object_is_malformed() {
    let server = start_mock_alpha_vantage().await;
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::intraday("GARBLED", Interval::FiveMinutes))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::MalformedPayload(_)));
}

#[tokio::test]
async fn upstream_failure_status_is_reported() {
    let server = start_mock_alpha_vantage().await;
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::intraday("BROKEN", Interval::FiveMinutes))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DataSourceError::HttpStatus {
            status: 503,
            body: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let config = ProviderConfig::new("test-key", "http://127.0.0.1:9").unwrap();
    let provider = AlphaVantageProvider::with_client(config, reqwest::Client::new());
    let err = provider
        .get_price_table(&PriceRequest::intraday("IBM", Interval::OneMinute))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::Network(_)));
}

#[tokio::test]
async fn range_without_bars_is_no_data() {
    let server = start_mock_alpha_vantage().await;
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
    let err = provider_for(&server)
        .get_price_table(&PriceRequest::historical("IBM", start, end))
        .await
        .unwrap_err();
    assert!(matches!(err, DataSourceError::NoData { ref symbol, .. } if symbol == "IBM"));
}

#[tokio::test]
async fn empty_intraday_series_is_no_data() {
    let server = start_mock_alpha_vantage().await;
    let service = AnalysisService::new(Arc::new(provider_for(&server)));
    let err = service
        .analyze(
            &PriceRequest::intraday("EMPTY", Interval::FiveMinutes),
            IndicatorParams::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DataSource(DataSourceError::NoData { .. })
    ));
}

#[tokio::test]
async fn network_error_does_not_expose_api_key() {
    let config = ProviderConfig::new("SECRET-KEY-123", "http://127.0.0.1:9").unwrap();
    let service = AnalysisService::new(Arc::new(AlphaVantageProvider::new(config)));
    let err = service
        .analyze(
            &PriceRequest::intraday("IBM", Interval::OneMinute),
            IndicatorParams::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::DataSource(DataSourceError::Network(_))
    ));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    assert!(!err.to_string().contains("apikey"));
}

#[tokio::test]
async fn undecodable_body_does_not_expose_api_key() {
    let server = start_mock_alpha_vantage().await;
    let config = ProviderConfig::new("SECRET-KEY-123", &server.uri()).unwrap();
    let err = AlphaVantageProvider::new(config)
        .get_price_table(&PriceRequest::intraday("NOTJSON", Interval::FiveMinutes))
        .await
        .unwrap_err();

    assert!(matches!(err, DataSourceError::MalformedPayload(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn service_reports_missing_close_without_partial_output() {
    let server = start_mock_alpha_vantage().await;
    let service = AnalysisService::new(Arc::new(provider_for(&server)));
    let err = service
        .analyze(
            &PriceRequest::intraday("NOCLOSE", Interval::FiveMinutes),
            IndicatorParams::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::Indicator(IndicatorError::MissingField("close".to_string()))
    );
}

#[tokio::test]
async fn service_derives_aligned_indicators() {
    let server = start_mock_alpha_vantage().await;
    let service = AnalysisService::new(Arc::new(provider_for(&server)));
    let report = service
        .analyze(
            &PriceRequest::intraday("IBM", Interval::FiveMinutes),
            IndicatorParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(report.series.len(), report.indicators.len());
    for (bar, point) in report.rows() {
        assert_eq!(bar.timestamp, point.timestamp);
    }
    let latest = report.indicators.latest().unwrap();
    assert!(latest.rolling_ma.is_some());
    assert!(latest.upper_band.unwrap() > latest.lower_band.unwrap());
}

#[tokio::test]
async fn invalid_params_fail_without_network_call() {
    let server = start_mock_alpha_vantage().await;
    let service = AnalysisService::new(Arc::new(provider_for(&server)));
    let err = service
        .analyze(
            &PriceRequest::intraday("IBM", Interval::FiveMinutes),
            IndicatorParams::default().with_bollinger(1, 2.0),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Indicator(IndicatorError::InvalidParameter { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

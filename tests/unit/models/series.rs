//! Unit tests for price series construction

use chrono::{DateTime, Utc};
use marketlens::indicators::IndicatorError;
use marketlens::models::series::{PriceBar, PriceSeries};
use serde_json::json;

fn ts(minute: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_186_000 + minute * 60, 0).unwrap()
}

#[test]
fn test_accepts_ascending_bars() {
    let bars = vec![
        PriceBar::new(ts(0), 10.0).with_ohlc(9.5, 10.5, 9.0).with_volume(1200.0),
        PriceBar::new(ts(1), 10.2),
        PriceBar::new(ts(5), 10.1),
    ];
    let series = PriceSeries::new(bars).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.closes(), vec![10.0, 10.2, 10.1]);
    assert_eq!(series.first().unwrap().volume, Some(1200.0));
}

#[test]
fn test_accepts_empty_series() {
    let series = PriceSeries::new(Vec::new()).unwrap();
    assert!(series.is_empty());
    assert_eq!(series, PriceSeries::empty());
}

#[test]
fn test_rejects_duplicate_timestamps() {
    let bars = vec![PriceBar::new(ts(0), 1.0), PriceBar::new(ts(0), 2.0)];
    let err = PriceSeries::new(bars).unwrap_err();
    assert!(matches!(err, IndicatorError::MalformedInput(_)));
}

#[test]
fn test_rejects_out_of_order_instead_of_sorting() {
    let bars = vec![PriceBar::new(ts(2), 1.0), PriceBar::new(ts(1), 2.0)];
    let err = PriceSeries::new(bars).unwrap_err();
    assert!(matches!(err, IndicatorError::MalformedInput(_)));
}

#[test]
fn test_rejects_non_finite_close() {
    let bars = vec![PriceBar::new(ts(0), 1.0), PriceBar::new(ts(1), f64::NAN)];
    assert!(PriceSeries::new(bars).is_err());
}

#[test]
fn test_iteration_restarts_from_first_bar() {
    let bars: Vec<PriceBar> = (0..4).map(|i| PriceBar::new(ts(i), i as f64)).collect();
    let series = PriceSeries::new(bars).unwrap();

    let first_pass: Vec<f64> = series.iter().map(|b| b.close).collect();
    let second_pass: Vec<f64> = (&series).into_iter().map(|b| b.close).collect();
    assert_eq!(first_pass, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_deserialization_enforces_ordering() {
    let unsorted = json!([
        {"timestamp": "2024-01-02T00:00:00Z", "close": 1.0},
        {"timestamp": "2024-01-01T00:00:00Z", "close": 2.0}
    ]);
    assert!(serde_json::from_value::<PriceSeries>(unsorted).is_err());

    let sorted = json!([
        {"timestamp": "2024-01-01T00:00:00Z", "close": 1.0},
        {"timestamp": "2024-01-02T00:00:00Z", "close": 2.0}
    ]);
    let series: PriceSeries = serde_json::from_value(sorted).unwrap();
    assert_eq!(series.len(), 2);
}

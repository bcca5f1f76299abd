//! Unit tests for the rolling moving average

use chrono::{DateTime, Utc};
use marketlens::indicators::trend::{calculate_rolling_ma, calculate_rolling_ma_default};
use marketlens::models::series::{PriceBar, PriceSeries};

fn create_test_series(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let ts = DateTime::<Utc>::from_timestamp(1_704_186_000 + i as i64 * 300, 0).unwrap();
            PriceBar::new(ts, close)
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Deterministic pseudo-random walk around 100
fn random_walk(count: usize) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut price = 100.0;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let step = ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5;
            price += step;
            price
        })
        .collect()
}

#[test]
fn test_rolling_ma_worked_example() {
    let closes: Vec<f64> = (1..=11).map(|v| v as f64).collect();
    let ma = calculate_rolling_ma_default(&create_test_series(&closes));

    assert!(ma[..9].iter().all(Option::is_none));
    assert_eq!(ma[9], Some(5.5));
    assert_eq!(ma[10], Some(6.5));
}

#[test]
fn test_rolling_ma_insufficient_data() {
    let ma = calculate_rolling_ma(&create_test_series(&[1.0, 2.0, 3.0]), 10);
    assert_eq!(ma, vec![None, None, None]);
}

#[test]
fn test_window_of_one_is_identity() {
    let closes = [3.0, 1.5, 8.25];
    let ma = calculate_rolling_ma(&create_test_series(&closes), 1);
    assert_eq!(ma, vec![Some(3.0), Some(1.5), Some(8.25)]);
}

#[test]
fn test_matches_naive_sliding_mean() {
    let closes = random_walk(500);
    let window = 10;
    let ma = calculate_rolling_ma(&create_test_series(&closes), window);

    for i in window - 1..closes.len() {
        let naive: f64 = closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
        let got = ma[i].unwrap();
        assert!(
            (got - naive).abs() < 1e-9,
            "index {}: incremental {} vs naive {}",
            i,
            got,
            naive
        );
    }
}

//! Unit tests for the trend indicators

use approx::assert_relative_eq;
use chrono::NaiveDate;
use tactix::indicators::trend::{adx, ema, rolling_max, rolling_min, sma};
use tactix::models::PriceBar;

fn flat_bars(count: usize, price: f64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            PriceBar::new(date, price, price, price, price, 1000.0)
        })
        .collect()
}

fn trending_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            let base = 100.0 + i as f64;
            PriceBar::new(date, base, base + 0.8, base - 0.5, base + 0.5, 1000.0)
        })
        .collect()
}

#[test]
fn sma_warm_up_is_undefined() {
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let out = sma(&values, 5);
    assert_eq!(out.len(), values.len());
    assert!(out[..4].iter().all(Option::is_none));
    assert_relative_eq!(out[4].unwrap(), 3.0);
    assert_relative_eq!(out[9].unwrap(), 8.0);
}

#[test]
fn sma_shorter_history_than_window_is_all_undefined() {
    let out = sma(&[1.0, 2.0, 3.0], 5);
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn ema_seed_is_the_first_sma() {
    let values = [2.0, 4.0, 6.0, 8.0, 10.0];
    let out = ema(&values, 3);
    assert!(out[0].is_none());
    assert!(out[1].is_none());
    assert_relative_eq!(out[2].unwrap(), 4.0);
    // k = 0.5: 4 + (8-4)*0.5 = 6, then 6 + (10-6)*0.5 = 8
    assert_relative_eq!(out[3].unwrap(), 6.0);
    assert_relative_eq!(out[4].unwrap(), 8.0);
}

#[test]
fn ema_of_constant_series_is_the_constant() {
    let values = vec![42.0; 60];
    let out = ema(&values, 12);
    assert_relative_eq!(out.last().unwrap().unwrap(), 42.0);
}

#[test]
fn rolling_extrema_track_the_window() {
    let values = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
    let max = rolling_max(&values, 3);
    let min = rolling_min(&values, 3);
    assert_relative_eq!(max[2].unwrap(), 4.0);
    assert_relative_eq!(min[3].unwrap(), 1.0);
    assert_relative_eq!(max[5].unwrap(), 9.0);
    assert_relative_eq!(min[6].unwrap(), 2.0);
}

#[test]
fn adx_is_undefined_on_a_flat_market() {
    let bars = flat_bars(60, 50.0);
    let series = adx(&bars, 14);
    assert!(series.adx.iter().all(Option::is_none));
    assert!(series.plus_di.iter().all(Option::is_none));
    assert!(series.minus_di.iter().all(Option::is_none));
}

#[test]
fn adx_reads_a_steady_trend_as_strong() {
    let bars = trending_bars(80);
    let series = adx(&bars, 14);
    let adx_value = series.adx.last().unwrap().unwrap();
    let plus = series.plus_di.last().unwrap().unwrap();
    let minus = series.minus_di.last().unwrap().unwrap();
    assert!(adx_value > 25.0, "trend strength was {adx_value}");
    assert!(plus > minus);
    assert!(adx_value.is_finite());
}

#[test]
fn adx_series_align_with_bars() {
    let bars = trending_bars(80);
    let series = adx(&bars, 14);
    assert_eq!(series.adx.len(), bars.len());
    assert_eq!(series.plus_di.len(), bars.len());
    assert_eq!(series.minus_di.len(), bars.len());
}

//! Unit tests for swing structure and retracement levels

use approx::assert_relative_eq;
use chrono::NaiveDate;
use tactix::indicators::structure::{fibonacci_levels, rolling_fibonacci, swing_window};
use tactix::models::PriceBar;

fn bar(i: usize, high: f64, low: f64) -> PriceBar {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
    PriceBar::new(date, low, high, low, (high + low) / 2.0, 1000.0)
}

#[test]
fn retracement_levels_are_the_standard_ratios() {
    let levels = fibonacci_levels(200.0, 100.0);
    assert_relative_eq!(levels.level_0, 100.0);
    assert_relative_eq!(levels.level_236, 123.6);
    assert_relative_eq!(levels.level_382, 138.2);
    assert_relative_eq!(levels.level_500, 150.0);
    assert_relative_eq!(levels.level_618, 161.8);
    assert_relative_eq!(levels.level_786, 178.6);
    assert_relative_eq!(levels.level_1000, 200.0);
}

#[test]
fn swing_window_finds_the_trailing_extremes() {
    let mut bars: Vec<PriceBar> = (0..60).map(|i| bar(i, 110.0, 90.0)).collect();
    bars[55] = bar(55, 130.0, 90.0);
    bars[58] = bar(58, 110.0, 70.0);

    let (high, low) = swing_window(&bars, 50).unwrap();
    assert_relative_eq!(high, 130.0);
    assert_relative_eq!(low, 70.0);
}

#[test]
fn swing_window_needs_a_full_window() {
    let bars: Vec<PriceBar> = (0..30).map(|i| bar(i, 110.0, 90.0)).collect();
    assert!(swing_window(&bars, 50).is_none());
    assert!(rolling_fibonacci(&bars, 50).is_none());
}

#[test]
fn rolling_fibonacci_spans_the_swing() {
    let bars: Vec<PriceBar> = (0..60).map(|i| bar(i, 120.0, 80.0)).collect();
    let levels = rolling_fibonacci(&bars, 50).unwrap();
    assert_relative_eq!(levels.level_0, 80.0);
    assert_relative_eq!(levels.level_1000, 120.0);
    assert_relative_eq!(levels.level_500, 100.0);
}

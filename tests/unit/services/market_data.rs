//! Unit tests for the static data provider

use chrono::NaiveDate;
use tactix::error::EngineError;
use tactix::models::PriceBar;
use tactix::services::{HistoricalDataProvider, StaticProvider};

fn bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            PriceBar::new(date, 10.0, 11.0, 9.0, 10.0 + i as f64 * 0.01, 500.0)
        })
        .collect()
}

#[tokio::test]
async fn seeded_symbol_returns_the_lookback_tail() {
    let provider = StaticProvider::new().with_bars("SPY", bars(100));
    let out = provider.daily_bars("SPY", 30).await.unwrap();
    assert_eq!(out.len(), 30);
    // The tail is the most recent bars, still oldest first.
    assert!(out.first().unwrap().date < out.last().unwrap().date);
    assert_eq!(out.last().unwrap().close, 10.0 + 99.0 * 0.01);
}

#[tokio::test]
async fn short_history_is_returned_whole() {
    let provider = StaticProvider::new().with_bars("SPY", bars(10));
    let out = provider.daily_bars("SPY", 60).await.unwrap();
    assert_eq!(out.len(), 10);
}

#[tokio::test]
async fn unseeded_symbol_is_a_market_data_error() {
    let provider = StaticProvider::new();
    let err = provider.daily_bars("NOPE", 60).await.unwrap_err();
    assert!(matches!(err, EngineError::MarketData { .. }));
}

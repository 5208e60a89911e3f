//! Unit tests for the multi-indicator voting system

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tactix::indicators::compute_set;
use tactix::models::{Direction, PriceBar, StrategyKind, VoteTally};
use tactix::strategies::voting::{evaluate, signal_from_tally, MAJORITY, VOTE_COUNT};

fn flat_universe(symbol: &str, count: usize) -> BTreeMap<String, tactix::models::IndicatorSet> {
    let bars: Vec<PriceBar> = (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            PriceBar::new(date, 50.0, 50.0, 50.0, 50.0, 1000.0)
        })
        .collect();
    let mut universe = BTreeMap::new();
    universe.insert(symbol.to_string(), compute_set(symbol, bars));
    universe
}

// Compounding uptrend: keeps the fast EMA and MACD line pulling ahead so
// the moving-average and MACD votes all land on the buy side.
fn uptrend_universe(symbol: &str, count: usize) -> BTreeMap<String, tactix::models::IndicatorSet> {
    let bars: Vec<PriceBar> = (0..count)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
            let base = 100.0 * 1.015_f64.powi(i as i32);
            PriceBar::new(date, base * 0.995, base * 1.01, base * 0.99, base, 1000.0)
        })
        .collect();
    let mut universe = BTreeMap::new();
    universe.insert(symbol.to_string(), compute_set(symbol, bars));
    universe
}

fn tally(buy: u32, sell: u32) -> VoteTally {
    VoteTally {
        symbol: "TEST".to_string(),
        buy,
        sell,
        neutral: VOTE_COUNT - buy - sell,
        price: 100.0,
        atr: 2.0,
    }
}

#[test]
fn flat_market_is_all_neutral_watch() {
    let universe = flat_universe("FLAT", 30);
    let (candidates, tallies) = evaluate(&universe);

    assert_eq!(candidates.len(), 1);
    let signal = &candidates[0];
    assert_eq!(signal.direction, Direction::Watch);
    assert!(
        signal.rationale.contains("0 buy / 0 sell / 7 neutral"),
        "rationale was: {}",
        signal.rationale
    );

    let tally = &tallies["FLAT"];
    assert_eq!((tally.buy, tally.sell, tally.neutral), (0, 0, VOTE_COUNT));
}

#[test]
fn steady_uptrend_reaches_a_buy_majority() {
    let universe = uptrend_universe("UP", 80);
    let (candidates, _) = evaluate(&universe);

    let signal = &candidates[0];
    assert_eq!(signal.direction, Direction::Buy);
    assert!(signal.strength >= MAJORITY);
    assert!(signal.stop_loss.unwrap() < signal.price);
    assert!(signal.target.unwrap() > signal.price);
}

#[test]
fn equal_counts_resolve_to_watch_never_a_coin_flip() {
    let signal = signal_from_tally(&tally(3, 3));
    assert_eq!(signal.direction, Direction::Watch);
    assert!(signal.rationale.contains("3 buy / 3 sell / 1 neutral"));
}

#[test]
fn sub_majority_counts_are_watch() {
    let signal = signal_from_tally(&tally(2, 1));
    assert_eq!(signal.direction, Direction::Watch);
    assert!(signal.stop_loss.is_none());
    assert!(signal.target.is_none());
}

#[test]
fn majority_confidence_is_the_vote_share() {
    let signal = signal_from_tally(&tally(5, 1));
    assert_eq!(signal.direction, Direction::Buy);
    assert_eq!(signal.strategy, StrategyKind::IndicatorVoting);
    assert!((signal.confidence - 5.0 / 7.0).abs() < 1e-12);
}

#[test]
fn sell_majority_inverts_stop_and_target() {
    let signal = signal_from_tally(&tally(1, 4));
    assert_eq!(signal.direction, Direction::Sell);
    assert!(signal.stop_loss.unwrap() > signal.price);
    assert!(signal.target.unwrap() < signal.price);
}

//! Tests for the orchestrator pipeline and the portfolio manager

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tactix::config::Config;
use tactix::engine::{load_universe, PortfolioTechnicalManager};
use tactix::error::EngineError;
use tactix::models::{AnalysisStatus, AssetClass, PriceBar, StrategyKind};
use tactix::services::{HistoricalDataProvider, NoopLimiter, StaticProvider};

fn day(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
}

fn uptrend_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let base = 100.0 * 1.015_f64.powi(i as i32);
            PriceBar::new(day(i), base * 0.995, base * 1.01, base * 0.99, base, 1000.0)
        })
        .collect()
}

fn decline_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let base = 200.0 - 0.8 * i as f64;
            PriceBar::new(day(i), base + 0.2, base + 0.5, base - 0.5, base, 1000.0)
        })
        .collect()
}

fn flat_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| PriceBar::new(day(i), 50.0, 50.1, 49.9, 50.0, 1000.0))
        .collect()
}

/// Config with no universe files on disk and tiny built-in universes.
fn test_config(universes: [(&[&str], AssetClass); 4]) -> Config {
    let mut config = Config::default();
    config.tickers_dir = "does-not-exist".to_string();
    for (symbols, class) in universes {
        let symbols: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        match class {
            AssetClass::Equities => config.equities.default_universe = symbols,
            AssetClass::Bonds => config.bonds.default_universe = symbols,
            AssetClass::Commodities => config.commodities.default_universe = symbols,
            AssetClass::Gold => config.gold.default_universe = symbols,
        }
    }
    config
}

struct FailingProvider;

#[async_trait]
impl HistoricalDataProvider for FailingProvider {
    async fn daily_bars(
        &self,
        symbol: &str,
        _lookback_days: u32,
    ) -> Result<Vec<PriceBar>, EngineError> {
        Err(EngineError::market_data(symbol, "simulated outage"))
    }
}

#[tokio::test]
async fn failing_class_does_not_poison_its_siblings() {
    let config = test_config([
        (&["UPA", "DOWN"], AssetClass::Equities),
        (&["BAD1"], AssetClass::Bonds),
        (&["BAD2"], AssetClass::Commodities),
        (&["BAD3"], AssetClass::Gold),
    ]);
    // Only the equity symbols are seeded; everything else errors out.
    let provider = StaticProvider::new()
        .with_bars("UPA", uptrend_bars(80))
        .with_bars("DOWN", decline_bars(60));

    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(provider))
        .with_limiter(Arc::new(NoopLimiter));
    assert!(manager.run_analysis().await);

    let statuses = manager.statuses();
    assert_eq!(statuses[&AssetClass::Equities], AnalysisStatus::Success);
    assert_eq!(statuses[&AssetClass::Bonds], AnalysisStatus::Error);
    assert_eq!(statuses[&AssetClass::Commodities], AnalysisStatus::Error);
    assert_eq!(statuses[&AssetClass::Gold], AnalysisStatus::Error);

    let equities = manager.asset_class_signals(AssetClass::Equities).unwrap();
    assert!(!equities.is_empty());
    let report = manager.class_report(AssetClass::Bonds).unwrap();
    assert!(report.error.is_some());
}

#[tokio::test]
async fn total_outage_marks_every_class_as_error() {
    let config = test_config([
        (&["A"], AssetClass::Equities),
        (&["B"], AssetClass::Bonds),
        (&["C"], AssetClass::Commodities),
        (&["D"], AssetClass::Gold),
    ]);
    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(FailingProvider))
        .with_limiter(Arc::new(NoopLimiter));

    assert!(!manager.run_analysis().await);
    for status in manager.statuses().values() {
        assert_eq!(*status, AnalysisStatus::Error);
    }
    // The aggregate surface still answers.
    assert_eq!(manager.trading_summary().total_signals, 0);
    assert!(manager.top_signals(10).is_empty());
}

#[tokio::test]
async fn empty_universe_is_no_signals_not_an_error() {
    let config = test_config([
        (&[], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&[], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(StaticProvider::new()))
        .with_limiter(Arc::new(NoopLimiter));

    assert!(!manager.run_analysis().await);
    for status in manager.statuses().values() {
        assert_eq!(*status, AnalysisStatus::NoSignals);
    }
}

#[tokio::test]
async fn insufficient_history_is_no_signals_not_an_error() {
    let config = test_config([
        (&["SHORT"], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&[], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    let provider = StaticProvider::new().with_bars("SHORT", flat_bars(20));
    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(provider))
        .with_limiter(Arc::new(NoopLimiter));

    manager.run_analysis().await;
    assert_eq!(
        manager.statuses()[&AssetClass::Equities],
        AnalysisStatus::NoSignals
    );
}

#[tokio::test]
async fn quiet_market_fills_the_minimum_with_forced_entries() {
    let config = test_config([
        (&[], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&["FLT1", "FLT2", "FLT3"], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    let provider = StaticProvider::new()
        .with_bars("FLT1", flat_bars(60))
        .with_bars("FLT2", flat_bars(60))
        .with_bars("FLT3", flat_bars(60));
    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(provider))
        .with_limiter(Arc::new(NoopLimiter));

    assert!(manager.run_analysis().await);
    let result = manager
        .asset_class_signals(AssetClass::Commodities)
        .unwrap();
    // min_positions for commodities is 2: both slots are forced fallbacks.
    assert_eq!(result.len(), 2);
    for signal in result.signals.values() {
        assert_eq!(signal.strategy, StrategyKind::ForcedEntry);
        assert!(signal.rationale.contains("fallback"));
    }
}

#[tokio::test]
async fn summary_and_validation_cover_every_selected_signal() {
    let config = test_config([
        (&["UPA", "DOWN"], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&[], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    let provider = StaticProvider::new()
        .with_bars("UPA", uptrend_bars(80))
        .with_bars("DOWN", decline_bars(60));
    let mut manager = PortfolioTechnicalManager::new(config, Arc::new(provider))
        .with_limiter(Arc::new(NoopLimiter));
    manager.run_analysis().await;

    let summary = manager.trading_summary();
    assert_eq!(
        summary.total_signals,
        summary.buy_signals + summary.sell_signals + summary.watch_signals
    );
    assert!(summary.total_signals > 0);
    assert!(!summary.strongest_signals.is_empty());

    let top = manager.top_signals(50);
    assert_eq!(top.len(), summary.total_signals);
    for pair in top.windows(2) {
        assert!(pair[0].signal.confidence >= pair[1].signal.confidence);
    }

    let validation = manager.validate_signals();
    assert!(validation.all_valid());
    assert_eq!(validation.checked_signals, summary.total_signals);

    let report = manager.comprehensive_report();
    assert_eq!(report.top_signals.len(), summary.total_signals.min(20));
}

#[test]
fn missing_universe_file_falls_back_to_the_default_list() {
    let config = test_config([
        (&["AAA", "BBB"], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&[], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    let symbols = load_universe(AssetClass::Equities, &config);
    assert_eq!(symbols, vec!["AAA".to_string(), "BBB".to_string()]);
}

#[test]
fn universe_file_overrides_the_default_list() {
    let dir = std::env::temp_dir().join(format!("tactix-universe-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("equities_list.txt"), "SPY\n\n  QQQ  \n").unwrap();

    let mut config = test_config([
        (&["AAA"], AssetClass::Equities),
        (&[], AssetClass::Bonds),
        (&[], AssetClass::Commodities),
        (&[], AssetClass::Gold),
    ]);
    config.tickers_dir = dir.to_string_lossy().to_string();

    let symbols = load_universe(AssetClass::Equities, &config);
    assert_eq!(symbols, vec!["SPY".to_string(), "QQQ".to_string()]);

    std::fs::remove_dir_all(&dir).ok();
}

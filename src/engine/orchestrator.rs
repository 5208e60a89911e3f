//! Per-asset-class analysis pipeline.
//!
//! One orchestrator owns one asset class end to end: universe → price
//! history → indicators → strategy module → selection. Individual
//! instrument failures are skips; only a dead data source for the whole
//! class is an error, and even that never crosses class boundaries.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::engine::universe::load_universe;
use crate::error::EngineError;
use crate::indicators::{compute_set, MIN_BARS};
use crate::metrics::Metrics;
use crate::models::{normalize_bars, AnalysisStatus, AssetClass, SelectionResult};
use crate::services::{HistoricalDataProvider, RateLimiter};
use crate::signals::select;
use crate::strategies::{
    BondStrategies, CommodityStrategies, EquityStrategies, GoldStrategies, IndicatorMap,
    StrategyModule,
};

/// What one orchestration pass produced.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub class: AssetClass,
    pub status: AnalysisStatus,
    pub selection: SelectionResult,
    pub universe_size: usize,
    pub instruments_analyzed: usize,
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassReport {
    pub(crate) fn not_run(class: AssetClass) -> Self {
        Self {
            class,
            status: AnalysisStatus::NotRun,
            selection: SelectionResult::default(),
            universe_size: 0,
            instruments_analyzed: 0,
            candidate_count: 0,
            error: None,
        }
    }
}

pub struct AssetClassOrchestrator {
    class: AssetClass,
    config: Config,
    provider: Arc<dyn HistoricalDataProvider>,
    limiter: Arc<dyn RateLimiter>,
    strategy: Box<dyn StrategyModule>,
    metrics: Option<Arc<Metrics>>,
}

fn strategy_for(class: AssetClass) -> Box<dyn StrategyModule> {
    match class {
        AssetClass::Equities => Box::new(EquityStrategies),
        AssetClass::Bonds => Box::new(BondStrategies),
        AssetClass::Commodities => Box::new(CommodityStrategies),
        AssetClass::Gold => Box::new(GoldStrategies),
    }
}

impl AssetClassOrchestrator {
    pub fn new(
        class: AssetClass,
        config: Config,
        provider: Arc<dyn HistoricalDataProvider>,
        limiter: Arc<dyn RateLimiter>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            class,
            config,
            provider,
            limiter,
            strategy: strategy_for(class),
            metrics,
        }
    }

    /// Run the full pipeline. Never panics outward; an unrecoverable fault
    /// becomes an `Error` status so sibling classes keep running.
    pub async fn run(&self) -> ClassReport {
        let started = Instant::now();
        info!(class = %self.class, "starting asset class analysis");

        let report = match self.run_inner().await {
            Ok(report) => report,
            Err(e) => {
                error!(class = %self.class, error = %e, "asset class analysis failed");
                ClassReport {
                    status: AnalysisStatus::Error,
                    error: Some(e.to_string()),
                    ..ClassReport::not_run(self.class)
                }
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics
                .class_analysis_duration_seconds
                .observe(started.elapsed().as_secs_f64());
            metrics
                .signals_selected_total
                .inc_by(report.selection.len() as u64);
        }
        info!(
            class = %self.class,
            status = %report.status,
            selected = report.selection.len(),
            "asset class analysis finished"
        );
        report
    }

    async fn run_inner(&self) -> Result<ClassReport, EngineError> {
        let universe = load_universe(self.class, &self.config);
        if universe.is_empty() {
            return Ok(ClassReport {
                status: AnalysisStatus::NoSignals,
                ..ClassReport::not_run(self.class)
            });
        }

        let (indicator_map, fetch_failures) = self.load_indicators(&universe).await;
        debug!(
            class = %self.class,
            usable = indicator_map.len(),
            failures = fetch_failures,
            "price history loaded"
        );

        if indicator_map.is_empty() {
            // Every single fetch erroring out means the source itself is
            // down; short histories alone are merely an absence of signals.
            if fetch_failures == universe.len() {
                return Err(EngineError::DataSourceDown {
                    class: self.class.to_string(),
                });
            }
            return Ok(ClassReport {
                status: AnalysisStatus::NoSignals,
                universe_size: universe.len(),
                ..ClassReport::not_run(self.class)
            });
        }

        let output = self.strategy.evaluate(&indicator_map);
        debug!(
            class = %self.class,
            candidates = output.candidates.len(),
            "strategy candidates generated"
        );

        let limits = self.config.class(self.class).limits;
        let selection = select(&output, limits);

        let status = if selection.is_empty() {
            AnalysisStatus::NoSignals
        } else {
            AnalysisStatus::Success
        };

        Ok(ClassReport {
            class: self.class,
            status,
            universe_size: universe.len(),
            instruments_analyzed: indicator_map.len(),
            candidate_count: output.candidates.len(),
            selection,
            error: None,
        })
    }

    /// Fetch histories under the rate limiter and compute indicator sets.
    /// Returns the usable sets plus the count of hard fetch failures.
    async fn load_indicators(&self, universe: &[String]) -> (IndicatorMap, usize) {
        let lookback = self.config.class(self.class).lookback_days;
        let mut map = IndicatorMap::new();
        let mut failures = 0;

        for symbol in universe {
            self.limiter.acquire().await;
            match self.provider.daily_bars(symbol, lookback).await {
                Ok(bars) => {
                    let bars = normalize_bars(bars);
                    if bars.len() < MIN_BARS {
                        warn!(
                            class = %self.class,
                            symbol = %symbol,
                            bars = bars.len(),
                            min = MIN_BARS,
                            "insufficient history, instrument excluded"
                        );
                        if let Some(metrics) = &self.metrics {
                            metrics.instruments_skipped_total.inc();
                        }
                        continue;
                    }
                    if let Some(metrics) = &self.metrics {
                        metrics.instruments_fetched_total.inc();
                    }
                    map.insert(symbol.clone(), compute_set(symbol, bars));
                }
                Err(e) => {
                    warn!(class = %self.class, symbol = %symbol, error = %e, "instrument data unavailable, skipped");
                    if let Some(metrics) = &self.metrics {
                        metrics.instruments_skipped_total.inc();
                    }
                    failures += 1;
                }
            }
        }

        (map, failures)
    }
}

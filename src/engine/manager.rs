//! Portfolio-wide technical analysis manager.
//!
//! Runs the four asset-class orchestrators concurrently (they share no
//! mutable state) and aggregates their reports into the query surface the
//! presentation layer consumes. A failing class never takes a sibling down;
//! whatever completed stays reportable.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::config::Config;
use crate::engine::orchestrator::{AssetClassOrchestrator, ClassReport};
use crate::metrics::Metrics;
use crate::models::{AnalysisStatus, AssetClass, Direction, SelectionResult, Signal};
use crate::services::{HistoricalDataProvider, IntervalLimiter, RateLimiter};

/// A signal paired with the class it came from, for cross-class rankings.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSignal {
    pub class: AssetClass,
    pub signal: Signal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassBreakdown {
    pub count: usize,
    pub buy: usize,
    pub sell: usize,
    pub watch: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TradingSummary {
    pub total_signals: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub watch_signals: usize,
    pub breakdown: BTreeMap<AssetClass, ClassBreakdown>,
    pub strongest_signals: Vec<RankedSignal>,
}

/// Structural check over every selected signal: identity, direction, and a
/// confidence inside the unit interval.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub checked_signals: usize,
    pub missing_symbols: usize,
    pub confidence_out_of_range: usize,
}

impl ValidationReport {
    pub fn all_valid(&self) -> bool {
        self.missing_symbols == 0 && self.confidence_out_of_range == 0
    }
}

/// Everything one full run produced, shaped for the JSON report sink.
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveReport {
    pub timestamp: String,
    pub statuses: BTreeMap<AssetClass, AnalysisStatus>,
    pub summary: TradingSummary,
    pub top_signals: Vec<RankedSignal>,
    pub validation: ValidationReport,
}

pub struct PortfolioTechnicalManager {
    config: Config,
    provider: Arc<dyn HistoricalDataProvider>,
    limiter: Arc<dyn RateLimiter>,
    metrics: Option<Arc<Metrics>>,
    reports: BTreeMap<AssetClass, ClassReport>,
}

impl PortfolioTechnicalManager {
    pub fn new(config: Config, provider: Arc<dyn HistoricalDataProvider>) -> Self {
        let limiter = Arc::new(IntervalLimiter::new(std::time::Duration::from_millis(
            config.request_delay_ms,
        )));
        Self {
            config,
            provider,
            limiter,
            metrics: None,
            reports: BTreeMap::new(),
        }
    }

    pub fn with_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run all four asset classes concurrently. Returns true when at least
    /// one class completed with signals.
    pub async fn run_analysis(&mut self) -> bool {
        info!("starting portfolio technical analysis");
        self.reports.clear();

        let mut handles = Vec::with_capacity(AssetClass::ALL.len());
        for class in AssetClass::ALL {
            let orchestrator = AssetClassOrchestrator::new(
                class,
                self.config.clone(),
                Arc::clone(&self.provider),
                Arc::clone(&self.limiter),
                self.metrics.clone(),
            );
            handles.push(tokio::spawn(async move { orchestrator.run().await }));
        }

        let joined = futures_util::future::join_all(handles).await;
        for (class, outcome) in AssetClass::ALL.into_iter().zip(joined) {
            match outcome {
                Ok(report) => {
                    self.reports.insert(class, report);
                }
                Err(e) => {
                    // A panicking task is isolated exactly like an error
                    // status; siblings already ran to completion.
                    error!(class = %class, error = %e, "asset class task aborted");
                    self.reports.insert(
                        class,
                        ClassReport {
                            status: AnalysisStatus::Error,
                            error: Some(e.to_string()),
                            ..ClassReport::not_run(class)
                        },
                    );
                }
            }
        }

        let succeeded = self
            .reports
            .values()
            .filter(|r| r.status == AnalysisStatus::Success)
            .count();
        info!(
            succeeded,
            total = AssetClass::ALL.len(),
            "portfolio technical analysis finished"
        );
        succeeded > 0
    }

    pub fn class_report(&self, class: AssetClass) -> Option<&ClassReport> {
        self.reports.get(&class)
    }

    /// Selected signals for one asset class, if that class has run.
    pub fn asset_class_signals(&self, class: AssetClass) -> Option<&SelectionResult> {
        self.reports.get(&class).map(|r| &r.selection)
    }

    pub fn statuses(&self) -> BTreeMap<AssetClass, AnalysisStatus> {
        AssetClass::ALL
            .iter()
            .map(|class| {
                let status = self
                    .reports
                    .get(class)
                    .map(|r| r.status)
                    .unwrap_or(AnalysisStatus::NotRun);
                (*class, status)
            })
            .collect()
    }

    /// Top `n` signals across all classes by confidence, symbol-stable.
    pub fn top_signals(&self, n: usize) -> Vec<RankedSignal> {
        let mut all: Vec<RankedSignal> = self
            .reports
            .iter()
            .flat_map(|(class, report)| {
                report.selection.signals.values().map(|signal| RankedSignal {
                    class: *class,
                    signal: signal.clone(),
                })
            })
            .collect();
        all.sort_by(|a, b| {
            b.signal
                .confidence
                .total_cmp(&a.signal.confidence)
                .then_with(|| a.signal.symbol.cmp(&b.signal.symbol))
        });
        all.truncate(n);
        all
    }

    pub fn trading_summary(&self) -> TradingSummary {
        let mut summary = TradingSummary::default();
        for (class, report) in &self.reports {
            let breakdown = ClassBreakdown {
                count: report.selection.len(),
                buy: report.selection.count_direction(Direction::Buy),
                sell: report.selection.count_direction(Direction::Sell),
                watch: report.selection.count_direction(Direction::Watch),
            };
            summary.total_signals += breakdown.count;
            summary.buy_signals += breakdown.buy;
            summary.sell_signals += breakdown.sell;
            summary.watch_signals += breakdown.watch;
            summary.breakdown.insert(*class, breakdown);
        }
        summary.strongest_signals = self.top_signals(5);
        summary
    }

    pub fn validate_signals(&self) -> ValidationReport {
        let mut validation = ValidationReport::default();
        for report in self.reports.values() {
            for signal in report.selection.signals.values() {
                validation.checked_signals += 1;
                if signal.symbol.trim().is_empty() {
                    validation.missing_symbols += 1;
                }
                if !(0.0..=1.0).contains(&signal.confidence) {
                    validation.confidence_out_of_range += 1;
                }
            }
        }
        validation
    }

    pub fn comprehensive_report(&self) -> ComprehensiveReport {
        ComprehensiveReport {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            statuses: self.statuses(),
            summary: self.trading_summary(),
            top_signals: self.top_signals(20),
            validation: self.validate_signals(),
        }
    }
}

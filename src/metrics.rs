//! Prometheus metrics for the screening pipeline.

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};

pub struct Metrics {
    registry: Registry,
    pub instruments_fetched_total: IntCounter,
    pub instruments_skipped_total: IntCounter,
    pub signals_selected_total: IntCounter,
    pub class_analysis_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let instruments_fetched_total = IntCounter::new(
            "tactix_instruments_fetched_total",
            "Instruments with usable price history",
        )?;
        let instruments_skipped_total = IntCounter::new(
            "tactix_instruments_skipped_total",
            "Instruments skipped for missing data or short history",
        )?;
        let signals_selected_total = IntCounter::new(
            "tactix_signals_selected_total",
            "Signals surviving selection across all classes",
        )?;
        let class_analysis_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "tactix_class_analysis_duration_seconds",
            "Wall time of one asset-class analysis pass",
        ))?;

        registry.register(Box::new(instruments_fetched_total.clone()))?;
        registry.register(Box::new(instruments_skipped_total.clone()))?;
        registry.register(Box::new(signals_selected_total.clone()))?;
        registry.register(Box::new(class_analysis_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            instruments_fetched_total,
            instruments_skipped_total,
            signals_selected_total,
            class_analysis_duration_seconds,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

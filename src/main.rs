use std::sync::Arc;

use tactix::config::Config;
use tactix::engine::PortfolioTechnicalManager;
use tactix::error::EngineError;
use tactix::logging::init_logging;
use tactix::metrics::Metrics;
use tactix::models::AssetClass;
use tactix::report::{save_class_signals, save_comprehensive_report};
use tactix::services::{HistoricalDataProvider, StooqProvider};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    let config = Config::from_env();
    init_logging();

    let provider: Arc<dyn HistoricalDataProvider> = match &config.data_base_url {
        Some(url) => Arc::new(StooqProvider::with_base_url(url.clone())),
        None => Arc::new(StooqProvider::new()),
    };

    let mut manager = PortfolioTechnicalManager::new(config.clone(), provider);
    if let Ok(metrics) = Metrics::new() {
        manager = manager.with_metrics(Arc::new(metrics));
    }

    manager.run_analysis().await;

    for class in AssetClass::ALL {
        if let Some(result) = manager.asset_class_signals(class) {
            if result.is_empty() && result.watchlist.is_empty() {
                continue;
            }
            if let Err(e) = save_class_signals(&config.reports_dir, class, result) {
                warn!(class = %class, error = %e, "failed to save signal table");
            }
        }
    }
    let report = manager.comprehensive_report();
    if let Err(e) = save_comprehensive_report(&config.reports_dir, &report) {
        warn!(error = %e, "failed to save comprehensive report");
    }

    print_summary(&manager);
    Ok(())
}

fn print_summary(manager: &PortfolioTechnicalManager) {
    let summary = manager.trading_summary();

    println!("Portfolio technical analysis");
    println!("  Total signals: {}", summary.total_signals);
    println!(
        "  Buy: {}  Sell: {}  Watch: {}",
        summary.buy_signals, summary.sell_signals, summary.watch_signals
    );

    for (class, status) in manager.statuses() {
        let line = match manager.class_report(class) {
            Some(report) => format!(
                "{:<12} {:<11} {} selected / {} analyzed",
                class.to_string(),
                status.to_string(),
                report.selection.len(),
                report.instruments_analyzed
            ),
            None => format!("{:<12} {}", class.to_string(), status),
        };
        println!("  {line}");
    }

    println!("  Strongest signals:");
    for ranked in manager.top_signals(5) {
        let s = &ranked.signal;
        println!(
            "    {:<6} {:<10} {:<5} {:.0}%  ${:.2}  [{}] {}",
            s.symbol,
            ranked.class.to_string(),
            s.direction.to_string(),
            s.confidence * 100.0,
            s.price,
            s.strategy,
            s.rationale
        );
    }
}

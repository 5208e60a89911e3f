//! File report sink.
//!
//! One CSV table per asset class plus a comprehensive JSON summary, all
//! timestamped. Report writing is best-effort from the caller's point of
//! view: a failed write is logged and the run carries on.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::engine::ComprehensiveReport;
use crate::error::EngineError;
use crate::models::{AssetClass, SelectionResult};

const TABLE_HEADER: &str =
    "instrument,strategy,direction,confidence,price,stop_loss,target,rationale";

fn timestamp() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn optional_price(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Write the selected signals of one asset class as a timestamped CSV
/// table. WATCH rows leave stop and target empty.
pub fn save_class_signals(
    dir: impl AsRef<Path>,
    class: AssetClass,
    result: &SelectionResult,
) -> Result<PathBuf, EngineError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_signals_{}.csv", class.name(), timestamp()));

    let mut lines = vec![TABLE_HEADER.to_string()];
    for signal in result.signals.values().chain(result.watchlist.values()) {
        lines.push(format!(
            "{},{},{},{:.4},{:.2},{},{},{}",
            csv_field(&signal.symbol),
            signal.strategy,
            signal.direction,
            signal.confidence,
            signal.price,
            optional_price(signal.stop_loss),
            optional_price(signal.target),
            csv_field(&signal.rationale),
        ));
    }
    fs::write(&path, lines.join("\n") + "\n")?;

    info!(class = %class, path = %path.display(), rows = lines.len() - 1, "signal table saved");
    Ok(path)
}

/// Write the cross-class summary as timestamped JSON.
pub fn save_comprehensive_report(
    dir: impl AsRef<Path>,
    report: &ComprehensiveReport,
) -> Result<PathBuf, EngineError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("comprehensive_report_{}.json", timestamp()));
    fs::write(&path, serde_json::to_string_pretty(report)?)?;

    info!(path = %path.display(), "comprehensive report saved");
    Ok(path)
}

use thiserror::Error;

/// Faults surfaced by the screening engine.
///
/// Indicator degeneracies (flat markets, zero divisors) are never errors;
/// they resolve to the per-indicator policies and stay inside the series.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("market data unavailable for {symbol}: {reason}")]
    MarketData { symbol: String, reason: String },

    #[error("insufficient history for {symbol}: {got} bars, need {need}")]
    InsufficientHistory {
        symbol: String,
        got: usize,
        need: usize,
    },

    #[error("data source failed for every instrument in {class}")]
    DataSourceDown { class: String },

    #[error("report output: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn market_data(symbol: impl Into<String>, reason: impl ToString) -> Self {
        Self::MarketData {
            symbol: symbol.into(),
            reason: reason.to_string(),
        }
    }
}

//! Historical market data provider interface.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::models::PriceBar;

#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// Daily bars for a symbol, oldest first, at most `lookback_days` rows.
    async fn daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>, EngineError>;
}

/// In-memory provider for tests and offline runs.
#[derive(Debug, Default)]
pub struct StaticProvider {
    bars: HashMap<String, Vec<PriceBar>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }
}

#[async_trait]
impl HistoricalDataProvider for StaticProvider {
    async fn daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>, EngineError> {
        let bars = self
            .bars
            .get(symbol)
            .ok_or_else(|| EngineError::market_data(symbol, "symbol not seeded"))?;
        let keep = lookback_days as usize;
        let start = bars.len().saturating_sub(keep);
        Ok(bars[start..].to_vec())
    }
}

//! Asset-class strategy modules.
//!
//! Each module is a pure function over the computed indicator sets of its
//! universe: it returns every qualifying candidate signal, unfiltered, plus
//! the raw vote tallies. Reconciling the candidates is the selection
//! policy's job, never the strategy's.

pub mod bonds;
pub mod commodities;
pub mod equities;
pub mod gold;
pub mod voting;

use std::collections::BTreeMap;

use crate::models::{latest, AssetClass, IndicatorSet, Signal, VoteTally};

pub use bonds::BondStrategies;
pub use commodities::CommodityStrategies;
pub use equities::EquityStrategies;
pub use gold::GoldStrategies;

/// Indicator sets for a class universe, keyed by symbol. Ordered so every
/// evaluation pass is reproducible.
pub type IndicatorMap = BTreeMap<String, IndicatorSet>;

/// Everything a strategy module hands to the selection policy.
#[derive(Debug, Clone, Default)]
pub struct StrategyOutput {
    pub candidates: Vec<Signal>,
    pub tallies: BTreeMap<String, VoteTally>,
}

pub trait StrategyModule: Send + Sync {
    fn asset_class(&self) -> AssetClass;

    fn evaluate(&self, universe: &IndicatorMap) -> StrategyOutput;
}

/// Most recent defined value of every series a strategy reads, pulled once
/// per instrument.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LatestIndicators {
    pub price: f64,
    pub prev_close: Option<f64>,
    pub volume: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr: Option<f64>,
    pub momentum_10: Option<f64>,
    pub momentum_20: Option<f64>,
    pub volume_sma: Option<f64>,
}

impl LatestIndicators {
    pub fn from_set(set: &IndicatorSet) -> Option<Self> {
        Some(Self {
            price: set.last_close()?,
            prev_close: set.prev_close(),
            volume: set.last_volume(),
            sma_20: latest(&set.sma_20),
            sma_50: latest(&set.sma_50),
            ema_12: latest(&set.ema_12),
            ema_26: latest(&set.ema_26),
            rsi: latest(&set.rsi_14),
            macd_line: latest(&set.macd.line),
            macd_signal: latest(&set.macd.signal),
            bb_upper: latest(&set.bollinger.upper),
            bb_middle: latest(&set.bollinger.middle),
            bb_lower: latest(&set.bollinger.lower),
            atr: latest(&set.atr_14),
            momentum_10: latest(&set.momentum_10),
            momentum_20: latest(&set.momentum_20),
            volume_sma: latest(&set.volume_sma_20),
        })
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Trade direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
    Watch,
}

impl Direction {
    pub fn is_directional(&self) -> bool {
        !matches!(self, Direction::Watch)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
            Direction::Watch => write!(f, "WATCH"),
        }
    }
}

/// Fusion priority class of a strategy. Asset-proxy strategies outrank the
/// voting system, which outranks the generic technical strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrategyClass {
    Generic = 0,
    Voting = 1,
    AssetProxy = 2,
}

/// Every strategy that can emit a candidate signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    IndicatorVoting,
    MomentumBreakout,
    MeanReversion,
    TrendFollowing,
    VolatilityBreakout,
    TechnicalBreakout,
    FibonacciRetracement,
    Momentum,
    YieldCurve,
    CreditSpread,
    HavenFlow,
    ForcedEntry,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::IndicatorVoting => "indicator_voting",
            StrategyKind::MomentumBreakout => "momentum_breakout",
            StrategyKind::MeanReversion => "mean_reversion",
            StrategyKind::TrendFollowing => "trend_following",
            StrategyKind::VolatilityBreakout => "volatility_breakout",
            StrategyKind::TechnicalBreakout => "technical_breakout",
            StrategyKind::FibonacciRetracement => "fibonacci_retracement",
            StrategyKind::Momentum => "momentum",
            StrategyKind::YieldCurve => "yield_curve",
            StrategyKind::CreditSpread => "credit_spread",
            StrategyKind::HavenFlow => "haven_flow",
            StrategyKind::ForcedEntry => "forced_entry",
        }
    }

    pub fn class(&self) -> StrategyClass {
        match self {
            StrategyKind::YieldCurve | StrategyKind::CreditSpread | StrategyKind::HavenFlow => {
                StrategyClass::AssetProxy
            }
            StrategyKind::IndicatorVoting => StrategyClass::Voting,
            _ => StrategyClass::Generic,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate or selected trading signal.
///
/// Stop and target are populated only for directional signals; a WATCH
/// signal carries neither but remains reportable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub strategy: StrategyKind,
    pub direction: Direction,
    pub strength: u32,
    pub confidence: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub rationale: String,
}

impl Signal {
    #[allow(clippy::too_many_arguments)]
    pub fn directional(
        symbol: impl Into<String>,
        strategy: StrategyKind,
        direction: Direction,
        strength: u32,
        confidence: f64,
        price: f64,
        stop_loss: f64,
        target: f64,
        rationale: impl Into<String>,
    ) -> Self {
        debug_assert!(direction.is_directional());
        Self {
            symbol: symbol.into(),
            strategy,
            direction,
            strength,
            confidence: confidence.clamp(0.0, 1.0),
            price,
            stop_loss: Some(stop_loss),
            target: Some(target),
            rationale: rationale.into(),
        }
    }

    pub fn watch(
        symbol: impl Into<String>,
        strategy: StrategyKind,
        strength: u32,
        confidence: f64,
        price: f64,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            strategy,
            direction: Direction::Watch,
            strength,
            confidence: confidence.clamp(0.0, 1.0),
            price,
            stop_loss: None,
            target: None,
            rationale: rationale.into(),
        }
    }
}

/// Raw outcome of the multi-indicator vote for one instrument. Kept beside
/// the candidate signals so forced entry can rank instruments that never
/// reached a majority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteTally {
    pub symbol: String,
    pub buy: u32,
    pub sell: u32,
    pub neutral: u32,
    pub price: f64,
    pub atr: f64,
}

impl VoteTally {
    /// The stronger directional count, used to rank forced-entry fallbacks.
    pub fn dominant(&self) -> u32 {
        self.buy.max(self.sell)
    }

    /// Forced entries take the dominant side of the vote, BUY on a tie.
    pub fn dominant_direction(&self) -> Direction {
        if self.buy >= self.sell {
            Direction::Buy
        } else {
            Direction::Sell
        }
    }
}

/// Bounded, fused per-class outcome of a selection pass. At most one signal
/// per instrument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionResult {
    pub signals: BTreeMap<String, Signal>,
    /// Fused WATCH signals that did not occupy a selection slot, retained
    /// for reporting.
    pub watchlist: BTreeMap<String, Signal>,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn count_direction(&self, direction: Direction) -> usize {
        self.signals
            .values()
            .filter(|s| s.direction == direction)
            .count()
    }
}

/// Outcome recorded per asset class after an orchestration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    NotRun,
    Success,
    NoSignals,
    Error,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::NotRun => write!(f, "not_run"),
            AnalysisStatus::Success => write!(f, "success"),
            AnalysisStatus::NoSignals => write!(f, "no_signals"),
            AnalysisStatus::Error => write!(f, "error"),
        }
    }
}

/// The four screened asset classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    Equities,
    Bonds,
    Commodities,
    Gold,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Equities,
        AssetClass::Bonds,
        AssetClass::Commodities,
        AssetClass::Gold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AssetClass::Equities => "equities",
            AssetClass::Bonds => "bonds",
            AssetClass::Commodities => "commodities",
            AssetClass::Gold => "gold",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub mod bar;
pub mod indicators;
pub mod signal;

pub use bar::{normalize_bars, PriceBar};
pub use indicators::{
    latest, AdxSeries, BollingerSeries, FibonacciLevels, IndicatorSet, MacdSeries, Series,
};
pub use signal::{
    AnalysisStatus, AssetClass, Direction, SelectionResult, Signal, StrategyClass, StrategyKind,
    VoteTally,
};

//! Technical indicator library.
//!
//! Every function maps input series of length N to an output series of
//! length N, with positions inside the warm-up window undefined. Degenerate
//! inputs (flat markets, zero divisors) resolve to the explicit policies
//! documented per indicator; no function returns NaN.

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

use crate::models::{IndicatorSet, PriceBar};

/// Minimum usable history. Instruments with fewer bars are excluded from
/// indicator computation.
pub const MIN_BARS: usize = 50;

/// Swing window feeding the Fibonacci retracement levels.
pub const FIB_SWING_WINDOW: usize = 50;

/// Compute the full indicator bundle for one instrument.
///
/// The caller is expected to have filtered histories shorter than
/// [`MIN_BARS`]; shorter input still works, it just yields mostly-undefined
/// series.
pub fn compute_set(symbol: &str, bars: Vec<PriceBar>) -> IndicatorSet {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    IndicatorSet {
        sma_20: trend::sma(&closes, 20),
        sma_50: trend::sma(&closes, 50),
        sma_200: trend::sma(&closes, 200),
        ema_12: trend::ema(&closes, 12),
        ema_26: trend::ema(&closes, 26),
        rsi_14: momentum::rsi(&closes, 14),
        macd: momentum::macd(&closes, 12, 26, 9),
        bollinger: volatility::bollinger(&closes, 20, 2.0),
        atr_14: volatility::atr(&bars, 14),
        adx_14: trend::adx(&bars, 14),
        realized_vol_20: volatility::realized_volatility(&closes, 20),
        momentum_10: momentum::roc(&closes, 10),
        momentum_20: momentum::roc(&closes, 20),
        volume_sma_20: trend::sma(&volumes, 20),
        fibonacci: structure::rolling_fibonacci(&bars, FIB_SWING_WINDOW),
        symbol: symbol.to_string(),
        bars,
    }
}

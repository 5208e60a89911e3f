//! Gold strategies: technical breakout, Fibonacci retracement, momentum,
//! and the haven-flow proxy.

use crate::models::{AssetClass, Direction, IndicatorSet, Signal, StrategyKind};
use crate::strategies::{voting, IndicatorMap, LatestIndicators, StrategyModule, StrategyOutput};

/// Bars feeding the safe-haven volatility read.
const HAVEN_WINDOW: usize = 90;
/// Proximity to a retracement level that counts as a touch.
const FIB_TOLERANCE: f64 = 0.02;

pub struct GoldStrategies;

impl StrategyModule for GoldStrategies {
    fn asset_class(&self) -> AssetClass {
        AssetClass::Gold
    }

    fn evaluate(&self, universe: &IndicatorMap) -> StrategyOutput {
        let (mut candidates, tallies) = voting::evaluate(universe);
        for set in universe.values() {
            candidates.extend(technical_breakout(set));
            candidates.extend(fibonacci(set));
            candidates.extend(momentum(set));
            candidates.extend(haven_flow(set));
        }
        StrategyOutput {
            candidates,
            tallies,
        }
    }
}

/// Full alignment break: averages ordered, band edge crossed, RSI inside
/// the sustainable range, volume confirming.
fn technical_breakout(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let (sma_20, sma_50) = (l.sma_20?, l.sma_50?);
    let rsi = l.rsi?;
    let (upper, lower) = (l.bb_upper?, l.bb_lower?);
    let (volume, volume_sma) = (l.volume?, l.volume_sma?);
    let atr = l.atr?;
    if atr <= 0.0 {
        return None;
    }

    let volume_confirmed = volume > volume_sma * 1.2;
    let breakout_up = l.price > sma_20
        && sma_20 > sma_50
        && l.price > upper
        && rsi > 50.0
        && rsi < 80.0
        && volume_confirmed;
    let breakout_down = l.price < sma_20
        && sma_20 < sma_50
        && l.price < lower
        && rsi < 50.0
        && rsi > 20.0
        && volume_confirmed;

    if breakout_up {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TechnicalBreakout,
            Direction::Buy,
            2,
            0.8,
            l.price,
            l.price - 2.0 * atr,
            l.price + 3.0 * atr,
            "breakout above upper band with aligned averages and confirming volume",
        ))
    } else if breakout_down {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TechnicalBreakout,
            Direction::Sell,
            2,
            0.8,
            l.price,
            l.price + 2.0 * atr,
            l.price - 3.0 * atr,
            "breakdown below lower band with aligned averages and confirming volume",
        ))
    } else {
        None
    }
}

/// Price sitting on the 0.382/0.618 retracement with an oversold RSI, or at
/// the 0.786 level overbought.
fn fibonacci(set: &IndicatorSet) -> Option<Signal> {
    let fib = set.fibonacci?;
    let l = LatestIndicators::from_set(set)?;
    let rsi = l.rsi?;
    let atr = l.atr?;
    if l.price <= 0.0 || atr <= 0.0 {
        return None;
    }

    let near = |level: f64| (l.price - level).abs() / l.price < FIB_TOLERANCE;

    if (near(fib.level_382) || near(fib.level_618)) && rsi < 40.0 {
        let level = if near(fib.level_382) { "0.382" } else { "0.618" };
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::FibonacciRetracement,
            Direction::Buy,
            1,
            0.6,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.0 * atr,
            format!("holding the {level} retracement with RSI {rsi:.1}"),
        ))
    } else if near(fib.level_786) && rsi > 60.0 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::FibonacciRetracement,
            Direction::Sell,
            1,
            0.6,
            l.price,
            l.price + 1.5 * atr,
            l.price - 2.0 * atr,
            format!("rejected at the 0.786 retracement with RSI {rsi:.1}"),
        ))
    } else {
        None
    }
}

/// Short and medium momentum past their thresholds, confirmed by MACD and
/// RSI on the same side.
fn momentum(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let (momentum_10, momentum_20) = (l.momentum_10?, l.momentum_20?);
    let (macd_line, macd_signal) = (l.macd_line?, l.macd_signal?);
    let rsi = l.rsi?;
    let atr = l.atr?;

    let strong = momentum_10 > 0.03 && momentum_20 > 0.05 && macd_line > macd_signal && rsi > 50.0;
    let weak = momentum_10 < -0.03 && momentum_20 < -0.05 && macd_line < macd_signal && rsi < 50.0;

    if strong {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::Momentum,
            Direction::Buy,
            1,
            0.7,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.5 * atr,
            format!(
                "strong momentum {m10:+.2}%/{m20:+.2}% with MACD and RSI confirming",
                m10 = momentum_10 * 100.0,
                m20 = momentum_20 * 100.0,
            ),
        ))
    } else if weak {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::Momentum,
            Direction::Sell,
            1,
            0.7,
            l.price,
            l.price + 1.5 * atr,
            l.price - 2.5 * atr,
            format!(
                "weak momentum {m10:+.2}%/{m20:+.2}% with MACD and RSI confirming",
                m10 = momentum_10 * 100.0,
                m20 = momentum_20 * 100.0,
            ),
        ))
    } else {
        None
    }
}

/// Safe-haven and inflation-hedge proxy.
///
/// Safe-haven factor: `1 − min(10·σ, 1)` over the daily returns of the last
/// 90 bars; a calm market scores near 1. Drift: mean daily return over the
/// full available history. Strong haven score with positive drift argues
/// for inflows, a weak score with negative drift for outflows.
fn haven_flow(set: &IndicatorSet) -> Option<Signal> {
    if set.len() < HAVEN_WINDOW {
        return None;
    }
    let l = LatestIndicators::from_set(set)?;
    let atr = l.atr?;

    let closes: Vec<f64> = set.bars.iter().map(|b| b.close).collect();
    let returns: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    if returns.len() < HAVEN_WINDOW - 1 {
        return None;
    }

    let recent = &returns[returns.len() - (HAVEN_WINDOW - 1)..];
    let mean_recent = recent.iter().sum::<f64>() / recent.len() as f64;
    let variance = recent
        .iter()
        .map(|r| (r - mean_recent).powi(2))
        .sum::<f64>()
        / (recent.len() as f64 - 1.0);
    let safe_haven = 1.0 - (variance.sqrt() * 10.0).min(1.0);

    let drift = returns.iter().sum::<f64>() / returns.len() as f64;

    if safe_haven >= 0.7 && drift > 0.0 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::HavenFlow,
            Direction::Buy,
            2,
            0.7,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.5 * atr,
            format!(
                "haven inflow: safe-haven factor {safe_haven:.2} with positive drift {d:+.3}%/day",
                d = drift * 100.0,
            ),
        ))
    } else if safe_haven <= 0.3 && drift < 0.0 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::HavenFlow,
            Direction::Sell,
            1,
            0.6,
            l.price,
            l.price + 1.5 * atr,
            l.price - 2.0 * atr,
            format!(
                "haven outflow: safe-haven factor {safe_haven:.2} with negative drift {d:+.3}%/day",
                d = drift * 100.0,
            ),
        ))
    } else {
        None
    }
}

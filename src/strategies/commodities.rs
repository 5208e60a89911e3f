//! Commodity strategies: trend following, volume-confirmed breakout, and
//! strict mean reversion.

use crate::models::{AssetClass, Direction, IndicatorSet, Signal, StrategyKind};
use crate::strategies::{voting, IndicatorMap, LatestIndicators, StrategyModule, StrategyOutput};

pub struct CommodityStrategies;

impl StrategyModule for CommodityStrategies {
    fn asset_class(&self) -> AssetClass {
        AssetClass::Commodities
    }

    fn evaluate(&self, universe: &IndicatorMap) -> StrategyOutput {
        let (mut candidates, tallies) = voting::evaluate(universe);
        for set in universe.values() {
            candidates.extend(trend_following(set));
            candidates.extend(breakout(set));
            candidates.extend(mean_reversion(set));
        }
        StrategyOutput {
            candidates,
            tallies,
        }
    }
}

/// Four sub-conditions must agree on a side: price vs both averages, the
/// average ordering itself, MACD line vs signal, and the sign of short and
/// medium momentum. Strength is the agreeing count; a signal needs at
/// least three.
fn trend_following(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let (sma_20, sma_50) = (l.sma_20?, l.sma_50?);
    let (macd_line, macd_signal) = (l.macd_line?, l.macd_signal?);
    let (momentum_10, momentum_20) = (l.momentum_10?, l.momentum_20?);
    let atr = l.atr?;
    if atr <= 0.0 {
        return None;
    }

    let up = [
        l.price > sma_20 && l.price > sma_50,
        sma_20 > sma_50,
        macd_line > macd_signal,
        momentum_10 > 0.0 && momentum_20 > 0.0,
    ];
    let down = [
        l.price < sma_20 && l.price < sma_50,
        sma_20 < sma_50,
        macd_line < macd_signal,
        momentum_10 < 0.0 && momentum_20 < 0.0,
    ];
    let up_strength = up.iter().filter(|c| **c).count() as u32;
    let down_strength = down.iter().filter(|c| **c).count() as u32;

    if up_strength >= 3 && up_strength > down_strength {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TrendFollowing,
            Direction::Buy,
            up_strength,
            f64::from(up_strength) / 4.0,
            l.price,
            l.price - 2.0 * atr,
            l.price + 3.0 * atr,
            format!(
                "uptrend: {up_strength}/4 conditions agree (MA order, MACD, momentum {m10:+.2}%/{m20:+.2}%)",
                m10 = momentum_10 * 100.0,
                m20 = momentum_20 * 100.0,
            ),
        ))
    } else if down_strength >= 3 && down_strength > up_strength {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TrendFollowing,
            Direction::Sell,
            down_strength,
            f64::from(down_strength) / 4.0,
            l.price,
            l.price + 2.0 * atr,
            l.price - 3.0 * atr,
            format!(
                "downtrend: {down_strength}/4 conditions agree (MA order, MACD, momentum {m10:+.2}%/{m20:+.2}%)",
                m10 = momentum_10 * 100.0,
                m20 = momentum_20 * 100.0,
            ),
        ))
    } else {
        None
    }
}

/// Band-edge break confirmed by volume materially above its rolling
/// average; stops and targets are volatility multiples from entry.
fn breakout(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let rsi = l.rsi?;
    let (upper, lower) = (l.bb_upper?, l.bb_lower?);
    let (volume, volume_sma) = (l.volume?, l.volume_sma?);
    let atr = l.atr?;
    if atr <= 0.0 {
        return None;
    }

    let volume_confirmed = volume > volume_sma * 1.5;
    if !volume_confirmed {
        return None;
    }

    if l.price > upper && rsi < 80.0 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::VolatilityBreakout,
            Direction::Buy,
            2,
            0.7,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.5 * atr,
            format!("upper band break on {vx:.1}x average volume", vx = volume / volume_sma),
        ))
    } else if l.price < lower && rsi > 20.0 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::VolatilityBreakout,
            Direction::Sell,
            2,
            0.7,
            l.price,
            l.price + 1.5 * atr,
            l.price - 2.5 * atr,
            format!("lower band break on {vx:.1}x average volume", vx = volume / volume_sma),
        ))
    } else {
        None
    }
}

/// RSI extreme AND a band edge, both required; the target is the midline.
fn mean_reversion(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let rsi = l.rsi?;
    let (upper, middle, lower) = (l.bb_upper?, l.bb_middle?, l.bb_lower?);
    let atr = l.atr?;
    if upper <= lower {
        return None;
    }

    if rsi < 30.0 && l.price < lower {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::MeanReversion,
            Direction::Buy,
            1,
            0.6,
            l.price,
            l.price - 1.5 * atr,
            middle,
            format!("oversold rebound: RSI {rsi:.1} below 30 with price under lower band"),
        ))
    } else if rsi > 70.0 && l.price > upper {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::MeanReversion,
            Direction::Sell,
            1,
            0.6,
            l.price,
            l.price + 1.5 * atr,
            middle,
            format!("overbought pullback: RSI {rsi:.1} above 70 with price over upper band"),
        ))
    } else {
        None
    }
}

//! Equity strategies: momentum breakout and mean reversion.

use crate::models::{AssetClass, Direction, IndicatorSet, Signal, StrategyKind};
use crate::strategies::{voting, IndicatorMap, LatestIndicators, StrategyModule, StrategyOutput};

pub struct EquityStrategies;

impl StrategyModule for EquityStrategies {
    fn asset_class(&self) -> AssetClass {
        AssetClass::Equities
    }

    fn evaluate(&self, universe: &IndicatorMap) -> StrategyOutput {
        let (mut candidates, tallies) = voting::evaluate(universe);
        for set in universe.values() {
            candidates.extend(momentum_breakout(set));
            candidates.extend(mean_reversion(set));
        }
        StrategyOutput {
            candidates,
            tallies,
        }
    }
}

/// Price above both simple averages (with the historical tolerance bands),
/// volume holding up, averages in bullish order. Strength is the number of
/// conditions met out of four; below the entry threshold the instrument is
/// kept on watch.
fn momentum_breakout(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let (sma_20, sma_50) = (l.sma_20?, l.sma_50?);
    let (volume, volume_sma) = (l.volume?, l.volume_sma?);
    let atr = l.atr?;
    // A dead market has nothing to break out of.
    if atr <= 0.0 {
        return None;
    }

    let conditions = [
        l.price > sma_20 * 0.98,
        l.price > sma_50 * 0.97,
        volume > volume_sma * 0.8,
        sma_20 > sma_50 * 0.99,
    ];
    let strength = conditions.iter().filter(|c| **c).count() as u32;

    if strength >= 2 {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::MomentumBreakout,
            Direction::Buy,
            strength,
            f64::from(strength) / 4.0,
            l.price,
            l.price - 2.0 * atr,
            l.price + 3.0 * atr,
            format!("momentum breakout: {strength}/4 conditions (price vs SMA20/SMA50, volume, trend)"),
        ))
    } else {
        Some(Signal::watch(
            &set.symbol,
            StrategyKind::MomentumBreakout,
            strength,
            0.3,
            l.price,
            format!("momentum breakout below threshold: {strength}/4 conditions"),
        ))
    }
}

/// RSI extreme or a Bollinger edge (with 5% tolerance); the target is the
/// band midline, not a volatility multiple.
fn mean_reversion(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let rsi = l.rsi?;
    let (upper, middle, lower) = (l.bb_upper?, l.bb_middle?, l.bb_lower?);
    let atr = l.atr?;
    // Collapsed bands mean there is no range to revert into.
    if upper <= lower {
        return None;
    }

    let oversold_rsi = rsi < 40.0;
    let oversold_band = l.price < lower * 1.05;
    let overbought_rsi = rsi > 60.0;
    let overbought_band = l.price > upper * 0.95;

    if oversold_rsi || oversold_band {
        let both = oversold_rsi && oversold_band;
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::MeanReversion,
            Direction::Buy,
            if both { 2 } else { 1 },
            if both { 0.7 } else { 0.5 },
            l.price,
            l.price - 1.5 * atr,
            middle,
            format!(
                "oversold: RSI {rsi:.1}{}, target band midline",
                if oversold_band { " and price below lower band" } else { "" }
            ),
        ))
    } else if overbought_rsi || overbought_band {
        let both = overbought_rsi && overbought_band;
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::MeanReversion,
            Direction::Sell,
            if both { 2 } else { 1 },
            if both { 0.7 } else { 0.5 },
            l.price,
            l.price + 1.5 * atr,
            middle,
            format!(
                "overbought: RSI {rsi:.1}{}, target band midline",
                if overbought_band { " and price above upper band" } else { "" }
            ),
        ))
    } else {
        None
    }
}

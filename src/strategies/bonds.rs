//! Bond strategies: yield-curve and credit-spread proxies plus a technical
//! breakout screen.
//!
//! Curve and spread shifts are inferred from the relative momentum of proxy
//! ETFs, not from actual yield data: long-duration Treasuries outperforming
//! short-duration reads as steepening pressure on the price side, high
//! yield outperforming investment grade as spread narrowing.

use crate::models::{AssetClass, Direction, IndicatorSet, Signal, StrategyKind};
use crate::strategies::{voting, IndicatorMap, LatestIndicators, StrategyModule, StrategyOutput};

/// Proxy instruments the curve/spread reads are anchored to.
pub const LONG_TREASURY: &str = "TLT";
pub const SHORT_TREASURY: &str = "SHY";
pub const INVESTMENT_GRADE: &str = "LQD";
pub const HIGH_YIELD: &str = "HYG";

const CURVE_THRESHOLD: f64 = 0.01;
const SPREAD_THRESHOLD: f64 = 0.02;

pub struct BondStrategies;

impl StrategyModule for BondStrategies {
    fn asset_class(&self) -> AssetClass {
        AssetClass::Bonds
    }

    fn evaluate(&self, universe: &IndicatorMap) -> StrategyOutput {
        let (mut candidates, tallies) = voting::evaluate(universe);
        candidates.extend(yield_curve(universe));
        candidates.extend(credit_spread(universe));
        for set in universe.values() {
            candidates.extend(technical_breakout(set));
        }
        StrategyOutput {
            candidates,
            tallies,
        }
    }
}

/// 5-day momentum spread between long and short duration proxies.
fn yield_curve(universe: &IndicatorMap) -> Option<Signal> {
    let long = universe.get(LONG_TREASURY)?;
    let short = universe.get(SHORT_TREASURY)?;
    let long_momentum = long.return_over(5)?;
    let short_momentum = short.return_over(5)?;
    let slope = long_momentum - short_momentum;

    if slope > CURVE_THRESHOLD {
        let l = LatestIndicators::from_set(long)?;
        let atr = l.atr?;
        Some(Signal::directional(
            LONG_TREASURY,
            StrategyKind::YieldCurve,
            Direction::Buy,
            2,
            0.8,
            l.price,
            l.price - 2.0 * atr,
            l.price + 3.0 * atr,
            format!(
                "curve steepening favors long duration: TLT 5d {long_momentum:+.2}% vs SHY {short_momentum:+.2}%",
                long_momentum = long_momentum * 100.0,
                short_momentum = short_momentum * 100.0,
            ),
        ))
    } else if slope < -CURVE_THRESHOLD {
        let l = LatestIndicators::from_set(short)?;
        let atr = l.atr?;
        Some(Signal::directional(
            SHORT_TREASURY,
            StrategyKind::YieldCurve,
            Direction::Buy,
            2,
            0.8,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.0 * atr,
            format!(
                "curve flattening favors short duration: TLT 5d {long_momentum:+.2}% vs SHY {short_momentum:+.2}%",
                long_momentum = long_momentum * 100.0,
                short_momentum = short_momentum * 100.0,
            ),
        ))
    } else {
        None
    }
}

/// 10-day momentum spread between high yield and investment grade.
fn credit_spread(universe: &IndicatorMap) -> Option<Signal> {
    let ig = universe.get(INVESTMENT_GRADE)?;
    let hy = universe.get(HIGH_YIELD)?;
    let ig_momentum = ig.return_over(10)?;
    let hy_momentum = hy.return_over(10)?;

    if hy_momentum - ig_momentum > SPREAD_THRESHOLD {
        let l = LatestIndicators::from_set(hy)?;
        let atr = l.atr?;
        Some(Signal::directional(
            HIGH_YIELD,
            StrategyKind::CreditSpread,
            Direction::Buy,
            2,
            0.7,
            l.price,
            l.price - 2.0 * atr,
            l.price + 3.0 * atr,
            format!(
                "spread narrowing favors high yield: HYG 10d {hy:+.2}% vs LQD {ig:+.2}%",
                hy = hy_momentum * 100.0,
                ig = ig_momentum * 100.0,
            ),
        ))
    } else if ig_momentum - hy_momentum > SPREAD_THRESHOLD {
        let l = LatestIndicators::from_set(ig)?;
        let atr = l.atr?;
        Some(Signal::directional(
            INVESTMENT_GRADE,
            StrategyKind::CreditSpread,
            Direction::Buy,
            2,
            0.7,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.0 * atr,
            format!(
                "spread widening favors investment grade: HYG 10d {hy:+.2}% vs LQD {ig:+.2}%",
                hy = hy_momentum * 100.0,
                ig = ig_momentum * 100.0,
            ),
        ))
    } else {
        None
    }
}

/// Moving-average breakout without an overbought RSI, or an oversold bounce
/// confirmed by the lower band.
fn technical_breakout(set: &IndicatorSet) -> Option<Signal> {
    let l = LatestIndicators::from_set(set)?;
    let (sma_20, sma_50) = (l.sma_20?, l.sma_50?);
    let lower = l.bb_lower?;
    let atr = l.atr?;
    if atr <= 0.0 {
        return None;
    }

    let overbought = l.rsi.map(|r| r > 70.0).unwrap_or(false);
    let oversold = l.rsi.map(|r| r < 30.0).unwrap_or(false);

    if l.price > sma_20 && l.price > sma_50 && !overbought {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TechnicalBreakout,
            Direction::Buy,
            1,
            0.6,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.0 * atr,
            "price above both moving averages without overbought RSI",
        ))
    } else if oversold && l.price < lower {
        Some(Signal::directional(
            &set.symbol,
            StrategyKind::TechnicalBreakout,
            Direction::Buy,
            1,
            0.6,
            l.price,
            l.price - 1.5 * atr,
            l.price + 2.0 * atr,
            "oversold bounce: RSI and lower band agree",
        ))
    } else {
        None
    }
}

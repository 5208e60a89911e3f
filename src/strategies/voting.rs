//! Multi-indicator voting.
//!
//! Seven independent votes per instrument. A direction is emitted only when
//! one side reaches the majority threshold AND strictly outnumbers the
//! other; an equal buy/sell count is always WATCH, never a coin-flip.

use std::collections::BTreeMap;

use crate::models::{Direction, Signal, StrategyKind, VoteTally};
use crate::strategies::{IndicatorMap, LatestIndicators};

pub const VOTE_COUNT: u32 = 7;
pub const MAJORITY: u32 = 3;

const WATCH_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Buy,
    Sell,
    Neutral,
}

/// Run the vote for every instrument in the universe.
pub fn evaluate(universe: &IndicatorMap) -> (Vec<Signal>, BTreeMap<String, VoteTally>) {
    let mut candidates = Vec::new();
    let mut tallies = BTreeMap::new();

    for (symbol, set) in universe {
        let Some(l) = LatestIndicators::from_set(set) else {
            continue;
        };
        let tally = tally_votes(symbol, &l);
        candidates.push(signal_from_tally(&tally));
        tallies.insert(symbol.clone(), tally);
    }

    (candidates, tallies)
}

fn tally_votes(symbol: &str, l: &LatestIndicators) -> VoteTally {
    let votes = [
        sma_vote(l),
        ema_vote(l),
        rsi_vote(l),
        macd_vote(l),
        bollinger_vote(l),
        atr_breakout_vote(l),
        volume_vote(l),
    ];

    let buy = votes.iter().filter(|v| **v == Vote::Buy).count() as u32;
    let sell = votes.iter().filter(|v| **v == Vote::Sell).count() as u32;
    VoteTally {
        symbol: symbol.to_string(),
        buy,
        sell,
        neutral: VOTE_COUNT - buy - sell,
        price: l.price,
        atr: l.atr.unwrap_or(0.0),
    }
}

/// Turn a tally into the voting candidate. An equal buy/sell count or a
/// sub-majority tally is WATCH.
pub fn signal_from_tally(tally: &VoteTally) -> Signal {
    let split = format!(
        "{} buy / {} sell / {} neutral",
        tally.buy, tally.sell, tally.neutral
    );

    let direction = if tally.buy >= MAJORITY && tally.buy > tally.sell {
        Direction::Buy
    } else if tally.sell >= MAJORITY && tally.sell > tally.buy {
        Direction::Sell
    } else {
        return Signal::watch(
            &tally.symbol,
            StrategyKind::IndicatorVoting,
            tally.dominant(),
            WATCH_CONFIDENCE,
            tally.price,
            format!("vote split without majority: {split}"),
        );
    };

    let winning = tally.dominant();
    let confidence = f64::from(winning) / f64::from(VOTE_COUNT);
    let (stop, target) = match direction {
        Direction::Buy => (tally.price - 2.0 * tally.atr, tally.price + 3.0 * tally.atr),
        _ => (tally.price + 2.0 * tally.atr, tally.price - 3.0 * tally.atr),
    };

    Signal::directional(
        &tally.symbol,
        StrategyKind::IndicatorVoting,
        direction,
        winning,
        confidence,
        tally.price,
        stop,
        target,
        format!("{winning} of {VOTE_COUNT} indicators vote {direction}: {split}"),
    )
}

/// Price above both simple averages with the averages in bullish order.
fn sma_vote(l: &LatestIndicators) -> Vote {
    let (Some(sma_20), Some(sma_50)) = (l.sma_20, l.sma_50) else {
        return Vote::Neutral;
    };
    if l.price > sma_20 && sma_20 > sma_50 {
        Vote::Buy
    } else if l.price < sma_20 && sma_20 < sma_50 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

fn ema_vote(l: &LatestIndicators) -> Vote {
    let (Some(ema_12), Some(ema_26)) = (l.ema_12, l.ema_26) else {
        return Vote::Neutral;
    };
    if l.price > ema_12 && ema_12 > ema_26 {
        Vote::Buy
    } else if l.price < ema_12 && ema_12 < ema_26 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

fn rsi_vote(l: &LatestIndicators) -> Vote {
    match l.rsi {
        Some(rsi) if rsi < 30.0 => Vote::Buy,
        Some(rsi) if rsi > 70.0 => Vote::Sell,
        _ => Vote::Neutral,
    }
}

/// MACD cross confirmed by the sign of the line.
fn macd_vote(l: &LatestIndicators) -> Vote {
    let (Some(line), Some(signal)) = (l.macd_line, l.macd_signal) else {
        return Vote::Neutral;
    };
    if line > signal && line > 0.0 {
        Vote::Buy
    } else if line < signal && line < 0.0 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

fn bollinger_vote(l: &LatestIndicators) -> Vote {
    let (Some(upper), Some(lower)) = (l.bb_upper, l.bb_lower) else {
        return Vote::Neutral;
    };
    if l.price < lower {
        Vote::Buy
    } else if l.price > upper {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Last close-to-close move larger than 1.5 ATR counts as a volatility
/// breakout in the direction of the move.
fn atr_breakout_vote(l: &LatestIndicators) -> Vote {
    let (Some(atr), Some(prev)) = (l.atr, l.prev_close) else {
        return Vote::Neutral;
    };
    let change = l.price - prev;
    if atr <= 0.0 || change.abs() <= atr * 1.5 {
        return Vote::Neutral;
    }
    if change > 0.0 {
        Vote::Buy
    } else {
        Vote::Sell
    }
}

/// Volume 1.5x above its 20-day average, attributed to the direction of the
/// last move.
fn volume_vote(l: &LatestIndicators) -> Vote {
    let (Some(volume), Some(volume_sma), Some(prev)) = (l.volume, l.volume_sma, l.prev_close)
    else {
        return Vote::Neutral;
    };
    if volume <= volume_sma * 1.5 {
        return Vote::Neutral;
    }
    if l.price > prev {
        Vote::Buy
    } else if l.price < prev {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

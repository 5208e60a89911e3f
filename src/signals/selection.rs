//! Selection policy: fuse candidates, rank, bound, force entries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{Direction, SelectionResult, Signal, StrategyKind, VoteTally};
use crate::strategies::StrategyOutput;

/// Confidence assigned to forced entries. Must stay strictly below the
/// weakest directional emitter (the voting majority floor of 3/7).
pub const FORCED_CONFIDENCE: f64 = 0.25;

/// Position count window for an asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionLimits {
    pub min: usize,
    pub max: usize,
}

impl PositionLimits {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: min.min(max),
            max,
        }
    }
}

/// Fuse all candidates for an asset class into one signal per instrument.
///
/// The winner is chosen by an explicit total order, never by emission
/// order: directional beats WATCH, then the strategy's priority class
/// (asset proxy > voting > generic), then confidence, then the strategy
/// name as a final lexicographic tie-break. Re-running fusion on the same
/// candidate set always yields the same survivors.
pub fn fuse(candidates: &[Signal]) -> BTreeMap<String, Signal> {
    let mut fused: BTreeMap<String, Signal> = BTreeMap::new();
    for candidate in candidates {
        let survives = match fused.get(&candidate.symbol) {
            Some(current) => prefer(candidate, current) == Ordering::Greater,
            None => true,
        };
        if survives {
            fused.insert(candidate.symbol.clone(), candidate.clone());
        }
    }
    fused
}

/// `Greater` means `a` survives fusion over `b`.
fn prefer(a: &Signal, b: &Signal) -> Ordering {
    a.direction
        .is_directional()
        .cmp(&b.direction.is_directional())
        .then(a.strategy.class().cmp(&b.strategy.class()))
        .then(a.confidence.total_cmp(&b.confidence))
        .then_with(|| b.strategy.name().cmp(a.strategy.name()))
}

/// Ranking order for the bounded list: confidence descending with a stable
/// symbol tie-break for reproducibility.
fn rank(a: &Signal, b: &Signal) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.symbol.cmp(&b.symbol))
}

/// Apply the full policy to a strategy module's output.
///
/// Only directional signals occupy ranked slots. When fewer directional
/// signals exist than the (universe-capped) minimum, the deficit is filled
/// by forced entries drawn from the remaining vote tallies, explicitly
/// labelled as fallbacks. An empty universe yields an empty result.
pub fn select(output: &StrategyOutput, limits: PositionLimits) -> SelectionResult {
    let fused = fuse(&output.candidates);

    let mut directional: Vec<&Signal> = fused
        .values()
        .filter(|s| s.direction.is_directional())
        .collect();
    directional.sort_by(|a, b| rank(a, b));

    let mut signals: BTreeMap<String, Signal> = directional
        .into_iter()
        .take(limits.max)
        .map(|s| (s.symbol.clone(), s.clone()))
        .collect();

    let universe_size = output
        .tallies
        .keys()
        .chain(fused.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let floor = limits.min.min(universe_size).min(limits.max);

    if signals.len() < floor {
        let mut pool: Vec<&VoteTally> = output
            .tallies
            .values()
            .filter(|t| !signals.contains_key(&t.symbol))
            .collect();
        pool.sort_by(|a, b| {
            b.dominant()
                .cmp(&a.dominant())
                .then_with(|| a.symbol.cmp(&b.symbol))
        });

        for tally in pool {
            if signals.len() >= floor {
                break;
            }
            signals.insert(tally.symbol.clone(), forced_entry(tally));
        }
    }

    let watchlist = fused
        .into_iter()
        .filter(|(symbol, s)| s.direction == Direction::Watch && !signals.contains_key(symbol))
        .collect();

    SelectionResult { signals, watchlist }
}

fn forced_entry(tally: &VoteTally) -> Signal {
    let direction = tally.dominant_direction();
    let (stop, target) = match direction {
        Direction::Buy => (tally.price - 1.5 * tally.atr, tally.price + 2.0 * tally.atr),
        _ => (tally.price + 1.5 * tally.atr, tally.price - 2.0 * tally.atr),
    };
    Signal::directional(
        &tally.symbol,
        StrategyKind::ForcedEntry,
        direction,
        1,
        FORCED_CONFIDENCE,
        tally.price,
        stop,
        target,
        format!(
            "forced entry to satisfy the minimum position count (vote tally {} buy / {} sell / {} neutral); fallback, not a validated opportunity",
            tally.buy, tally.sell, tally.neutral
        ),
    )
}

//! MACD (Moving Average Convergence Divergence).

use crate::indicators::trend::{ema, ema_of_series};
use crate::models::{MacdSeries, Series};

/// MACD line = EMA(fast) − EMA(slow); signal = EMA(signal_window) of the
/// line; histogram = line − signal. Each component keeps its own warm-up.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_window: usize) -> MacdSeries {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let line: Series = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = ema_of_series(&line, signal_window);

    let histogram: Series = line
        .iter()
        .zip(signal.iter())
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

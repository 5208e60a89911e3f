//! Fibonacci retracement levels from a rolling swing window.

use crate::models::{FibonacciLevels, PriceBar};

/// Standard retracement prices between a swing low and high.
pub fn fibonacci_levels(high: f64, low: f64) -> FibonacciLevels {
    let diff = high - low;
    FibonacciLevels {
        level_0: low,
        level_236: low + 0.236 * diff,
        level_382: low + 0.382 * diff,
        level_500: low + 0.5 * diff,
        level_618: low + 0.618 * diff,
        level_786: low + 0.786 * diff,
        level_1000: high,
    }
}

/// Highest high and lowest low over the trailing `window` bars, absent when
/// the history is shorter than the window.
pub fn swing_window(bars: &[PriceBar], window: usize) -> Option<(f64, f64)> {
    if window == 0 || bars.len() < window {
        return None;
    }
    let tail = &bars[bars.len() - window..];
    let high = tail.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = tail.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    Some((high, low))
}

/// Retracement levels for the trailing `window` swing, if it filled.
pub fn rolling_fibonacci(bars: &[PriceBar], window: usize) -> Option<FibonacciLevels> {
    let (high, low) = swing_window(bars, window)?;
    Some(fibonacci_levels(high, low))
}

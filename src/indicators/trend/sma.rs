//! Simple moving average.

use crate::models::Series;

/// Trailing-window mean. The first `window - 1` positions are undefined.
pub fn sma(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }
    out
}

/// Trailing maximum over `window` values.
pub fn rolling_max(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let max = values[i + 1 - window..=i]
            .iter()
            .copied()
            .fold(f64::MIN, f64::max);
        out[i] = Some(max);
    }
    out
}

/// Trailing minimum over `window` values.
pub fn rolling_min(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let min = values[i + 1 - window..=i]
            .iter()
            .copied()
            .fold(f64::MAX, f64::min);
        out[i] = Some(min);
    }
    out
}

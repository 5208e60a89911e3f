//! Bollinger Bands.

use crate::indicators::trend::sma;
use crate::models::{BollingerSeries, Series};

/// Rolling sample standard deviation (n − 1 denominator, matching the
/// convention of the daily feeds this screens). Needs `window >= 2`.
pub fn rolling_stddev(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (window as f64 - 1.0);
        out[i] = Some(var.sqrt());
    }
    out
}

/// Middle band = SMA(window), exactly; upper/lower = middle ± k·stddev.
pub fn bollinger(values: &[f64], window: usize, k: f64) -> BollingerSeries {
    let middle = sma(values, window);
    let stddev = rolling_stddev(values, window);

    let upper: Series = middle
        .iter()
        .zip(stddev.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m + k * s),
            _ => None,
        })
        .collect();
    let lower: Series = middle
        .iter()
        .zip(stddev.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - k * s),
            _ => None,
        })
        .collect();

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

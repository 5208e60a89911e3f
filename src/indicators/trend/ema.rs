//! Exponential moving average.

use crate::indicators::trend::sma::sma;
use crate::models::Series;

/// Exponential smoothing with factor `2 / (window + 1)`, seeded with the
/// SMA of the first `window` values. Defined from index `window - 1`.
pub fn ema(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let k = 2.0 / (window as f64 + 1.0);
    let mut prev = values[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = Some(prev);
    for i in window..values.len() {
        prev += (values[i] - prev) * k;
        out[i] = Some(prev);
    }
    out
}

/// EMA over a series that carries its own warm-up head, e.g. the MACD line.
/// Smoothing starts at the first defined position; earlier positions stay
/// undefined. Stops at an interior hole rather than smoothing across it.
pub fn ema_of_series(series: &[Option<f64>], window: usize) -> Series {
    let mut out = vec![None; series.len()];
    let Some(start) = series.iter().position(|v| v.is_some()) else {
        return out;
    };

    let defined: Vec<f64> = series[start..]
        .iter()
        .map_while(|v| *v)
        .collect();
    let inner = ema(&defined, window);
    for (j, v) in inner.into_iter().enumerate() {
        out[start + j] = v;
    }
    out
}

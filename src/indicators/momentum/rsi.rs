//! RSI (Relative Strength Index), Wilder's smoothing.

use crate::models::Series;

/// RSI over `window` periods. Needs `window + 1` values before the first
/// defined position.
///
/// Zero-division policy, applied here and nowhere else: a loss average of
/// zero saturates the index at 100, except for the fully degenerate case of
/// a window with no movement at all, which is undefined.
pub fn rsi(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() <= window {
        return out;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=window {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }
    let w = window as f64;
    let mut avg_gain = gains / w;
    let mut avg_loss = losses / w;
    out[window] = rsi_from_averages(avg_gain, avg_loss);

    for i in window + 1..values.len() {
        let delta = values[i] - values[i - 1];
        let (gain, loss) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };
        avg_gain = (avg_gain * (w - 1.0) + gain) / w;
        avg_loss = (avg_loss * (w - 1.0) + loss) / w;
        out[i] = rsi_from_averages(avg_gain, avg_loss);
    }
    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

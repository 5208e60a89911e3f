//! Annualized realized volatility of daily returns.

use crate::indicators::volatility::bollinger::rolling_stddev;
use crate::models::Series;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Sample stddev of simple daily returns over `window`, annualized with
/// √252. The return series itself consumes one bar, so the first defined
/// position is index `window`.
pub fn realized_volatility(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() <= window {
        return out;
    }

    let mut returns = Vec::with_capacity(values.len() - 1);
    for i in 1..values.len() {
        if values[i - 1] != 0.0 {
            returns.push(values[i] / values[i - 1] - 1.0);
        } else {
            returns.push(0.0);
        }
    }

    let stddev = rolling_stddev(&returns, window);
    for (j, s) in stddev.into_iter().enumerate() {
        out[j + 1] = s.map(|s| s * TRADING_DAYS_PER_YEAR.sqrt());
    }
    out
}

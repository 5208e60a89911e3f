//! ATR (Average True Range), Wilder's smoothing.

use crate::indicators::trend::adx::{true_range, wilder_smooth};
use crate::models::{PriceBar, Series};

/// Wilder-smoothed true range. The first bar's TR falls back to high − low
/// since it has no previous close. Defined from index `window - 1`.
pub fn atr(bars: &[PriceBar], window: usize) -> Series {
    if window == 0 || bars.len() < window {
        return vec![None; bars.len()];
    }

    let mut tr = Vec::with_capacity(bars.len());
    tr.push(bars[0].high - bars[0].low);
    for i in 1..bars.len() {
        tr.push(true_range(&bars[i], bars[i - 1].close));
    }

    wilder_smooth(&tr, window)
}

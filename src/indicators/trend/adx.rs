//! ADX / directional movement (Wilder).

use crate::models::{AdxSeries, PriceBar, Series};

/// Wilder smoothing: SMA seed over the first `window` values, then
/// `prev * (window - 1) / window + value / window`.
pub(crate) fn wilder_smooth(values: &[f64], window: usize) -> Series {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut prev = values[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = Some(prev);
    let w = window as f64;
    for i in window..values.len() {
        prev = (prev * (w - 1.0) + values[i]) / w;
        out[i] = Some(prev);
    }
    out
}

pub(crate) fn true_range(bar: &PriceBar, prev_close: f64) -> f64 {
    let hl = bar.high - bar.low;
    let hc = (bar.high - prev_close).abs();
    let lc = (bar.low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// ADX with +DI/−DI, all aligned to the bar index.
///
/// Flat stretches where the smoothed true range or the DI sum is zero
/// leave the affected positions undefined instead of propagating NaN; the
/// ADX smoother simply skips them.
pub fn adx(bars: &[PriceBar], window: usize) -> AdxSeries {
    let n = bars.len();
    let mut series = AdxSeries {
        adx: vec![None; n],
        plus_di: vec![None; n],
        minus_di: vec![None; n],
    };
    if window == 0 || n < window + 1 {
        return series;
    }

    // Movement arrays are offset by one: index j describes bar j + 1.
    let mut tr = Vec::with_capacity(n - 1);
    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    for i in 1..n {
        tr.push(true_range(&bars[i], bars[i - 1].close));
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let smooth_tr = wilder_smooth(&tr, window);
    let smooth_plus = wilder_smooth(&plus_dm, window);
    let smooth_minus = wilder_smooth(&minus_dm, window);

    // Wilder smoothing of DX, fed only by defined DX values.
    let w = window as f64;
    let mut dx_seed: Vec<f64> = Vec::with_capacity(window);
    let mut adx_prev: Option<f64> = None;

    for j in 0..n - 1 {
        let (Some(t), Some(p), Some(m)) = (smooth_tr[j], smooth_plus[j], smooth_minus[j]) else {
            continue;
        };
        if t <= 0.0 {
            continue;
        }
        let pdi = 100.0 * p / t;
        let mdi = 100.0 * m / t;
        series.plus_di[j + 1] = Some(pdi);
        series.minus_di[j + 1] = Some(mdi);

        let di_sum = pdi + mdi;
        if di_sum <= 0.0 {
            continue;
        }
        let dx = 100.0 * (pdi - mdi).abs() / di_sum;

        match adx_prev {
            Some(prev) => {
                let next = (prev * (w - 1.0) + dx) / w;
                adx_prev = Some(next);
                series.adx[j + 1] = Some(next);
            }
            None => {
                dx_seed.push(dx);
                if dx_seed.len() == window {
                    let seed = dx_seed.iter().sum::<f64>() / w;
                    adx_prev = Some(seed);
                    series.adx[j + 1] = Some(seed);
                }
            }
        }
    }

    series
}

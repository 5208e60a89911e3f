use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar for a single instrument.
///
/// Bars are kept in chronological order per instrument. Calendar gaps
/// (holidays, missing sessions) are allowed; downstream computation is
/// positional and must not assume contiguous dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Sort bars chronologically and drop duplicate dates, keeping the last
/// observation for each date. Data feeds occasionally re-deliver the most
/// recent session.
pub fn normalize_bars(mut bars: Vec<PriceBar>) -> Vec<PriceBar> {
    bars.reverse();
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}

use crate::models::bar::PriceBar;

/// A derived series aligned to the source bar index. Positions inside the
/// indicator's warm-up window are `None`, never zero.
pub type Series = Vec<Option<f64>>;

/// Last defined value of a series.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Series,
    pub signal: Series,
    pub histogram: Series,
}

#[derive(Debug, Clone, Default)]
pub struct BollingerSeries {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

#[derive(Debug, Clone, Default)]
pub struct AdxSeries {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

/// Standard retracement prices for a swing high/low pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FibonacciLevels {
    pub level_0: f64,
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    pub level_1000: f64,
}

/// Full indicator bundle for one instrument.
///
/// Invariant: every series has the same length as `bars`. Values whose
/// warm-up window exceeds the available history are absent.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    pub sma_20: Series,
    pub sma_50: Series,
    pub sma_200: Series,
    pub ema_12: Series,
    pub ema_26: Series,
    pub rsi_14: Series,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
    pub atr_14: Series,
    pub adx_14: AdxSeries,
    pub realized_vol_20: Series,
    pub momentum_10: Series,
    pub momentum_20: Series,
    pub volume_sma_20: Series,
    /// Retracement levels from the rolling 50-bar high/low window, absent
    /// when that window never filled.
    pub fibonacci: Option<FibonacciLevels>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn prev_close(&self) -> Option<f64> {
        if self.bars.len() < 2 {
            return None;
        }
        Some(self.bars[self.bars.len() - 2].close)
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.bars.last().map(|b| b.volume)
    }

    /// Close-to-close change of the most recent session.
    pub fn last_move(&self) -> Option<f64> {
        Some(self.last_close()? - self.prev_close()?)
    }

    /// Simple return of the close over the last `n` sessions.
    pub fn return_over(&self, n: usize) -> Option<f64> {
        if self.bars.len() <= n {
            return None;
        }
        let past = self.bars[self.bars.len() - 1 - n].close;
        if past == 0.0 {
            return None;
        }
        Some(self.last_close()? / past - 1.0)
    }
}

//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR is the trailing simple moving average of TR over `period` bars —
//! not Wilder smoothing. With TR[0] valid, ATR is defined from index
//! `period - 1` onward.

use crate::domain::Candle;
use crate::indicators::rolling_mean;

/// Compute the True Range series from candles.
///
/// TR[0] = high[0] - low[0] — the prev-close terms are missing, so the
/// missing-aware max degrades to the single available term.
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = candles[0].high;
    let l = candles[0].low;
    if h.is_nan() || l.is_nan() {
        tr[0] = f64::NAN;
    } else {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

/// ATR over a trailing `period`-bar window.
///
/// NaN until a full window of valid true ranges exists: indices
/// `0..period-1` are missing, index `period-1` is the first defined value.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    rolling_mean(&true_range(candles), period)
}

//! Bulk annotation pass.
//!
//! Derived columns (ATR, RSI, bar range, month key) are computed once over
//! the sorted series and indexed positionally inside the walk-forward scan.
//! Nothing is recomputed per bar, keeping the driver linear in series
//! length rather than quadratic in fired signals.

use crate::domain::{Candle, MonthKey};
use crate::indicators;

/// A candle series sorted by timestamp with aligned derived columns.
///
/// `atr` and `rsi` use NaN for the warm-up region.
#[derive(Debug, Clone)]
pub struct AnnotatedSeries {
    pub candles: Vec<Candle>,
    pub atr: Vec<f64>,
    pub rsi: Vec<f64>,
    pub range: Vec<f64>,
    pub months: Vec<MonthKey>,
}

/// Sort a copy of the series ascending by timestamp (stable, so duplicate
/// timestamps keep their input order) and compute every derived column.
pub fn annotate(candles: &[Candle], period: usize) -> AnnotatedSeries {
    let mut sorted: Vec<Candle> = candles.to_vec();
    sorted.sort_by_key(|c| c.ts);

    let atr = indicators::atr(&sorted, period);
    let rsi = indicators::rsi(&sorted, period);
    let range = sorted.iter().map(Candle::range).collect();
    let months = sorted.iter().map(|c| MonthKey::from_ts(c.ts)).collect();

    AnnotatedSeries {
        candles: sorted,
        atr,
        rsi,
        range,
        months,
    }
}

/// Contiguous index span of each distinct month, ascending.
///
/// Returns `(month, first_index, last_index)` with both bounds inclusive.
/// The input is sorted by timestamp, so every month occupies one span.
pub fn month_spans(months: &[MonthKey]) -> Vec<(MonthKey, usize, usize)> {
    let mut spans: Vec<(MonthKey, usize, usize)> = Vec::new();
    for (i, &m) in months.iter().enumerate() {
        match spans.last_mut() {
            Some((current, _, last)) if *current == m => *last = i,
            _ => spans.push((m, i, i)),
        }
    }
    spans
}

//! Month-partitioned walk-forward driver.
//!
//! Scans the annotated series chronologically, one calendar month at a
//! time, skipping the first two months as warm-up history. A toy
//! RSI-extreme signal arms a bracket trade per qualifying bar; each trade
//! resolves over the next `horizon_bars` bars through the simulator.
//!
//! Known quirk, preserved for output compatibility: a month is appended to
//! the `months` list whenever ANY trade has occurred so far in the run, not
//! when that month itself traded. Trade-free months after the first trade
//! are therefore still recorded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Candle;
use crate::engine::precompute::{annotate, month_spans};
use crate::engine::simulate::{simulate, Direction, SimError};
use crate::sessions::session_label;

/// ATR/RSI lookback.
const INDICATOR_PERIOD: usize = 14;
/// Leading months excluded from the scan.
const WARMUP_MONTHS: usize = 2;
/// Absolute floor on the stop distance, in price units.
const STOP_FLOOR: f64 = 0.0008;
/// Stop distance as a fraction of ATR.
const ATR_STOP_FRACTION: f64 = 0.8;
/// Take-profit distance as a multiple of the stop distance.
const REWARD_RISK: f64 = 1.4;

/// One recorded month in the walk-forward output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub month: String,
}

/// Aggregated walk-forward statistics.
///
/// Serializes to `{"months":[{"month":"2024-03"},...],"trades":N,
/// "pnl":X,"winrate":W}` — the shape the backtest CLI writes out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkForwardSummary {
    pub months: Vec<MonthEntry>,
    pub trades: u64,
    pub pnl: f64,
    pub winrate: f64,
}

impl WalkForwardSummary {
    fn empty() -> Self {
        Self {
            months: Vec::new(),
            trades: 0,
            pnl: 0.0,
            winrate: 0.0,
        }
    }
}

/// Errors from the walk-forward driver.
#[derive(Debug, Error)]
pub enum WalkForwardError {
    #[error("horizon_bars must be at least 1")]
    InvalidHorizon,
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// A bracket trade armed by the signal rule. Transient — consumed by the
/// simulator, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeIntent {
    pub direction: Direction,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Toy RSI-extreme signal rule.
///
/// Long when RSI < 30 with the bar range exceeding ATR; short when
/// RSI > 70 under the same range condition. The entry is biased half a
/// stop-distance into the move, the stop sits one stop-distance beyond
/// the entry, and the take-profit 1.4 stop-distances in favor. Missing
/// indicators (NaN) produce no signal.
pub fn rsi_extreme_signal(price: f64, atr: f64, rsi: f64, range: f64) -> Option<TradeIntent> {
    if atr.is_nan() || rsi.is_nan() {
        return None;
    }
    let d_sl = (atr * ATR_STOP_FRACTION).max(STOP_FLOOR);
    if rsi < 30.0 && range > atr {
        let entry = price - 0.5 * d_sl;
        Some(TradeIntent {
            direction: Direction::Long,
            entry,
            stop_loss: entry - d_sl,
            take_profit: entry + REWARD_RISK * d_sl,
        })
    } else if rsi > 70.0 && range > atr {
        let entry = price + 0.5 * d_sl;
        Some(TradeIntent {
            direction: Direction::Short,
            entry,
            stop_loss: entry + d_sl,
            take_profit: entry - REWARD_RISK * d_sl,
        })
    } else {
        None
    }
}

/// Run the monthly walk-forward over a candle series.
///
/// The series is copied, sorted, and annotated once; the scan then walks
/// plain integer indices. Months beyond the two-month warm-up are processed
/// in order; within a month, the scan stops early enough that a full
/// `horizon_bars` future window always exists, so the simulator never sees
/// an empty window.
///
/// Fewer than three distinct months degrades silently to an all-zero
/// summary — by contract, not as an error. The only rejected input is
/// `horizon_bars == 0`.
pub fn monthly_walkforward(
    candles: &[Candle],
    horizon_bars: usize,
) -> Result<WalkForwardSummary, WalkForwardError> {
    if horizon_bars == 0 {
        return Err(WalkForwardError::InvalidHorizon);
    }

    let series = annotate(candles, INDICATOR_PERIOD);
    let spans = month_spans(&series.months);
    if spans.len() <= WARMUP_MONTHS {
        return Ok(WalkForwardSummary::empty());
    }

    let mut months: Vec<MonthEntry> = Vec::new();
    let mut trades: u64 = 0;
    let mut wins: u64 = 0;
    let mut pnl = 0.0;

    for &(month, first, last) in spans.iter().skip(WARMUP_MONTHS) {
        // Exclusive upper bound leaves horizon_bars + 1 bars of headroom at
        // the month's tail, so every future window is fully populated.
        let stop = last.saturating_sub(horizon_bars + 1);
        for i in first..stop {
            let bar = &series.candles[i];
            let Some(intent) =
                rsi_extreme_signal(bar.close, series.atr[i], series.rsi[i], series.range[i])
            else {
                continue;
            };

            let session = session_label(bar.ts);
            let future = &series.candles[i + 1..i + 1 + horizon_bars];
            let result = simulate(
                future,
                intent.entry,
                intent.stop_loss,
                intent.take_profit,
                session,
                intent.direction,
            )?;

            trades += 1;
            pnl += result;
            if result > 0.0 {
                wins += 1;
            }
        }

        // Cumulative gate (see module docs): records every processed month
        // once any trade has ever occurred in this run.
        if trades > 0 {
            months.push(MonthEntry {
                month: month.to_string(),
            });
        }
    }

    let winrate = wins as f64 / trades.max(1) as f64;
    Ok(WalkForwardSummary {
        months,
        trades,
        pnl,
        winrate,
    })
}

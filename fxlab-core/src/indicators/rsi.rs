//! Relative Strength Index (RSI).
//!
//! Trailing-mean variant: gains and losses are averaged over a plain
//! `period`-bar window, and the zero-loss case is handled by an epsilon in
//! the denominator rather than a special case. An all-gains window reads
//! ≈100 (not exactly 100), an all-losses window reads exactly 0.

use crate::domain::Candle;
use crate::indicators::rolling_mean;

const EPSILON: f64 = 1e-12;

/// RSI over closes with a trailing `period`-bar window.
///
/// `delta[i] = close[i] - close[i-1]` is missing at index 0, so the first
/// defined output is at index `period`.
pub fn rsi(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];

    for i in 1..n {
        let curr = candles[i].close;
        let prev = candles[i - 1].close;
        if curr.is_nan() || prev.is_nan() {
            continue;
        }
        let delta = curr - prev;
        gains[i] = delta.max(0.0);
        losses[i] = (-delta).max(0.0);
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        let rs = avg_gain[i] / (avg_loss[i] + EPSILON);
        out[i] = 100.0 - 100.0 / (1.0 + rs);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles};

    #[test]
    fn rsi_warmup_boundary() {
        let candles = make_candles(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let out = rsi(&candles, 3);
        // delta[0] is missing, so the first full window ends at index 3.
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert!(!out[3].is_nan());
    }

    #[test]
    fn rsi_all_gains_saturates_high() {
        let candles = make_candles(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let out = rsi(&candles, 3);
        // Zero loss: rs = gain/epsilon, RSI just under 100.
        assert!(out[3] > 99.9 && out[3] <= 100.0);
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let candles = make_candles(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let out = rsi(&candles, 3);
        assert_approx(out[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_mixed_known_values() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Deltas: +0.34, -0.25, -0.48, +0.72
        // Index 3 window: gain = 0.34/3, loss = 0.73/3
        //   RSI = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        // Index 4 window: gain = 0.72/3, loss = 0.73/3
        //   RSI = 100 - 100/(1 + 0.72/0.73) = 49.6551...
        let candles = make_candles(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let out = rsi(&candles, 3);
        assert_approx(out[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-6);
        assert_approx(out[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-6);
    }

    #[test]
    fn rsi_bounds() {
        let candles = make_candles(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let out = rsi(&candles, 3);
        for (i, &v) in out.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_nan_close_poisons_windows() {
        let mut candles = make_candles(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        candles[2].close = f64::NAN;
        let out = rsi(&candles, 3);
        // deltas at 2 and 3 are missing, so no full window exists.
        assert!(out.iter().all(|v| v.is_nan()));
    }
}

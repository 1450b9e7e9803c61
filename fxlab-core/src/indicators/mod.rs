//! Stateless indicator functions over candle slices.
//!
//! Both indicators are pure functions of the series prefix up to and
//! including the current bar — no lookahead. Missing values are NaN, and a
//! trailing window containing NaN yields NaN (the warm-up region).

pub mod atr;
pub mod rsi;

pub use atr::{atr, true_range};
pub use rsi::rsi;

/// Trailing simple moving average with a full-window requirement.
///
/// `out[i]` is the mean of `values[i+1-window ..= i]`; NaN while the window
/// is incomplete. NaN inputs poison every window they fall in (the sum
/// carries them through), which is exactly the warm-up semantics the
/// indicators rely on.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 || n < window {
        return out;
    }
    for i in (window - 1)..n {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        out[i] = sum / window as f64;
    }
    out
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 0.001, low = min(open,close) - 0.001, volume = 100.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 0.001;
            let low = open.min(close) - 0.001;
            Candle {
                ts: base + chrono::Duration::minutes(i as i64),
                open,
                high,
                low,
                close,
                volume: 100,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_mean_basic() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_approx(out[1], 1.5, DEFAULT_EPSILON);
        assert_approx(out[2], 2.5, DEFAULT_EPSILON);
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_nan_poisons_window() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan()); // window [NaN, 3]
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_short_series_all_nan() {
        let out = rolling_mean(&[1.0, 2.0], 3);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rolling_mean_zero_window_all_nan() {
        let out = rolling_mean(&[1.0, 2.0], 0);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}

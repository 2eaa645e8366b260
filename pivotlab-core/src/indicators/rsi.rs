//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge case: avg_loss == 0 → RSI = 100, including a perfectly flat series.

use super::Indicator;
use crate::domain::{bar, Bar};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        rsi_series(&bar::closes(bars), self.period)
    }
}

/// RSI over a close series.
///
/// Values at indices `< period` are `None`. A series of `period` closes or
/// fewer has no complete set of changes and is all `None`.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut result = vec![None; n];

    if period == 0 || n <= period {
        return result;
    }

    // Seed: average gain and average loss over changes 1..=period
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let (gain, loss) = split_change(closes[i] - closes[i - 1]);
        avg_gain += gain;
        avg_loss += loss;
    }
    let period_f = period as f64;
    avg_gain /= period_f;
    avg_loss /= period_f;

    result[period] = Some(compute_rsi(avg_gain, avg_loss));

    for i in (period + 1)..n {
        let (gain, loss) = split_change(closes[i] - closes[i - 1]);
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        result[i] = Some(compute_rsi(avg_gain, avg_loss));
    }

    result
}

/// Split a close-to-close change into (gain, loss), both non-negative.
/// A NaN change poisons both sides.
fn split_change(change: f64) -> (f64, f64) {
    if change.is_nan() {
        (f64::NAN, f64::NAN)
    } else if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains() {
        let rsi = rsi_series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3);
        // All positive changes → RSI = 100
        assert_approx(rsi[3].unwrap(), 100.0, 1e-6);
        assert_approx(rsi[5].unwrap(), 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let rsi = rsi_series(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0], 3);
        // All negative changes → RSI = 0
        assert_approx(rsi[3].unwrap(), 0.0, 1e-6);
    }

    #[test]
    fn rsi_flat_series_is_100() {
        // Zero average loss wins over zero average gain.
        let rsi = rsi_series(&[50.0; 10], 3);
        for v in rsi.iter().skip(3) {
            assert_approx(v.unwrap(), 100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // period=3 seed: avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI[3] = 100 - 100/(1 + 0.34/0.73)
        // RSI[4]: avg_gain = (0.34/3*2 + 0.72)/3, avg_loss = (0.73/3*2)/3
        let rsi = rsi_series(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);

        assert!(rsi[0].is_none());
        assert!(rsi[1].is_none());
        assert!(rsi[2].is_none());
        assert_approx(rsi[3].unwrap(), 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);

        let g = (0.34 / 3.0 * 2.0 + 0.72) / 3.0;
        let l = (0.73 / 3.0 * 2.0) / 3.0;
        assert_approx(rsi[4].unwrap(), 100.0 - 100.0 / (1.0 + g / l), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let rsi = rsi_series(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0], 3);
        for (i, v) in rsi.iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_too_short_is_all_none() {
        assert!(rsi_series(&[1.0, 2.0, 3.0], 3).iter().all(Option::is_none));
        assert!(rsi_series(&[], 14).is_empty());
        assert!(rsi_series(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_indicator_matches_series() {
        let closes = [10.0, 11.0, 10.5, 12.0, 11.0, 13.0, 12.5];
        let bars = make_bars(&closes);
        let rsi = Rsi::new(3);
        assert_eq!(rsi.compute(&bars), rsi_series(&closes, 3));
        assert_eq!(rsi.name(), "rsi_3");
        assert_eq!(rsi.lookback(), 3);
    }
}

//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing: ATR[t] = (ATR[t-1] * (period-1) + TR[t]) / period.
//! Seed: ATR[period-1] = mean of TR[0..period], where TR[0] = high[0] - low[0].
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::{bar, Bar};

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        atr_series(
            &bar::highs(bars),
            &bar::lows(bars),
            &bar::closes(bars),
            self.period,
        )
    }
}

/// Compute the True Range series from high/low/close columns.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
///
/// Columns of unequal length are truncated to the shortest.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut tr = Vec::with_capacity(n);

    for i in 0..n {
        let range = highs[i] - lows[i];
        if i == 0 {
            tr.push(range);
            continue;
        }
        let pc = closes[i - 1];
        tr.push(range.max((highs[i] - pc).abs()).max((lows[i] - pc).abs()));
    }

    tr
}

/// Apply Wilder smoothing to a series.
///
/// Seed: mean of the first `period` values, placed at index `period - 1`.
/// Earlier indices are `None`; a series shorter than `period` is all `None`.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if period == 0 || n < period {
        return result;
    }

    let period_f = period as f64;
    let mut prev = values[..period].iter().sum::<f64>() / period_f;
    result[period - 1] = Some(prev);

    for i in period..n {
        prev = (prev * (period_f - 1.0) + values[i]) / period_f;
        result[i] = Some(prev);
    }

    result
}

/// ATR over high/low/close columns.
pub fn atr_series(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    wilder_smooth(&true_range(highs, lows, closes), period)
}

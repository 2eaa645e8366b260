//! Adaptive Moving Average (AMA).
//!
//! Blends a fast and a slow EMA of closes, weighted by the rolling volatility
//! of percent returns, then smooths the blend with a window-span EMA:
//!
//!   raw[t] = fast[t] + vol[t] * (close[t] - slow[t])
//!   AMA[t] = m * raw[t] + (1 - m) * AMA[t-1],   m = 2 / (window + 1)
//!
//! vol[t] is the population standard deviation of the last `window` percent
//! changes, and 0 until that window is full. The series is all `None` when
//! fewer than `window` closes exist; otherwise every index carries a value.

use super::ema::{ema_multiplier, seeded_ema};
use super::Indicator;
use crate::domain::{bar, Bar};

#[derive(Debug, Clone)]
pub struct Ama {
    window: usize,
    fast_factor: f64,
    slow_factor: f64,
    name: String,
}

impl Ama {
    pub fn new(window: usize, fast_factor: f64, slow_factor: f64) -> Self {
        assert!(window >= 1, "AMA window must be >= 1");
        Self {
            window,
            fast_factor,
            slow_factor,
            name: format!("ama_{window}"),
        }
    }
}

impl Indicator for Ama {
    fn name(&self) -> &str {
        &self.name
    }

    /// Values start at index 0 once the series is long enough.
    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        ama_series(
            &bar::closes(bars),
            self.window,
            self.fast_factor,
            self.slow_factor,
        )
    }
}

/// Percent change between consecutive closes. `pct[0] = 0`; a zero previous
/// close also yields 0.
pub fn pct_changes(closes: &[f64]) -> Vec<f64> {
    let mut pct = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i == 0 || closes[i - 1] == 0.0 {
            pct.push(0.0);
        } else {
            pct.push((closes[i] - closes[i - 1]) / closes[i - 1]);
        }
    }
    pct
}

/// Population standard deviation over each trailing `window`. Indices before
/// the first full window are 0.
pub fn rolling_volatility(pct: &[f64], window: usize) -> Vec<f64> {
    let n = pct.len();
    let mut vol = vec![0.0; n];

    if window == 0 || n < window {
        return vol;
    }

    let w = window as f64;
    for i in (window - 1)..n {
        let slice = &pct[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / w;
        let var = slice.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / w;
        vol[i] = var.sqrt();
    }

    vol
}

/// AMA over a close series.
pub fn ama_series(
    closes: &[f64],
    window: usize,
    fast_factor: f64,
    slow_factor: f64,
) -> Vec<Option<f64>> {
    let n = closes.len();
    if window == 0 || n < window {
        return vec![None; n];
    }

    let w = window as f64;
    let vol = rolling_volatility(&pct_changes(closes), window);
    let fast = seeded_ema(closes, ema_multiplier(fast_factor * w));
    let slow = seeded_ema(closes, ema_multiplier(slow_factor * w));
    let m = ema_multiplier(w);

    let blend = |i: usize| fast[i] + vol[i] * (closes[i] - slow[i]);

    // Index 0 is recomputed from this seed, which makes AMA[0] == raw[0].
    let mut prev = blend(0);
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let ama = blend(i) * m + prev * (1.0 - m);
        result.push(Some(ama));
        prev = ama;
    }

    result
}

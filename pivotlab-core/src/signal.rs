//! Signal derivation from breakout counters, with an RSI veto.
//!
//! A Buy fires on the bar where the up counter increments, a Sell where the
//! down counter increments. Buy wins if both tick on the same bar. The RSI
//! veto can only suppress: an overbought Buy or an oversold Sell becomes Hold.

use crate::domain::Signal;
use crate::params::{RSI_OVERBOUGHT, RSI_OVERSOLD};

/// Overbought/oversold thresholds for the veto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiVeto {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiVeto {
    fn default() -> Self {
        Self {
            overbought: RSI_OVERBOUGHT,
            oversold: RSI_OVERSOLD,
        }
    }
}

impl RsiVeto {
    /// Apply the veto to one signal given that bar's RSI.
    pub fn filter(&self, signal: Signal, rsi: Option<f64>) -> Signal {
        match (signal, rsi) {
            (Signal::Buy, Some(r)) if r > self.overbought => Signal::Hold,
            (Signal::Sell, Some(r)) if r < self.oversold => Signal::Hold,
            (s, _) => s,
        }
    }

    /// Apply the veto across a series. Missing RSI entries count as absent.
    pub fn apply(&self, signals: &[Signal], rsi: &[Option<f64>]) -> Vec<Signal> {
        signals
            .iter()
            .enumerate()
            .map(|(i, &s)| self.filter(s, rsi.get(i).copied().flatten()))
            .collect()
    }
}

/// Raw edge signals from the breakout counters. Index 0 is always Hold.
pub fn raw_signals(up_count: &[u64], down_count: &[u64]) -> Vec<Signal> {
    let n = up_count.len().min(down_count.len());
    let mut signals = vec![Signal::Hold; n];

    for i in 1..n {
        signals[i] = if up_count[i] > up_count[i - 1] {
            Signal::Buy
        } else if down_count[i] > down_count[i - 1] {
            Signal::Sell
        } else {
            Signal::Hold
        };
    }

    signals
}

/// Raw signals followed by the default RSI veto.
pub fn derive_signals(up_count: &[u64], down_count: &[u64], rsi: &[Option<f64>]) -> Vec<Signal> {
    RsiVeto::default().apply(&raw_signals(up_count, down_count), rsi)
}

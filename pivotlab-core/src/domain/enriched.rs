//! Pipeline output types: enriched bars and the signal summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Bar, Signal};

/// A bar plus every derived per-bar value.
///
/// Indicator fields are `None` during warm-up. `up_count` / `down_count` are
/// monotone breakout counters; only their increments carry meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(flatten)]
    pub bar: Bar,
    pub rsi: Option<f64>,
    pub atr: Option<f64>,
    pub ama: Option<f64>,
    pub upper_bound: Option<f64>,
    pub lower_bound: Option<f64>,
    pub is_pivot_high: bool,
    pub is_pivot_low: bool,
    pub signal: Signal,
    pub up_count: u64,
    pub down_count: u64,
}

impl EnrichedBar {
    /// An enriched bar with nothing derived: all indicators absent, Hold.
    pub fn bare(bar: Bar) -> Self {
        Self {
            bar,
            rsi: None,
            atr: None,
            ama: None,
            upper_bound: None,
            lower_bound: None,
            is_pivot_high: false,
            is_pivot_low: false,
            signal: Signal::Hold,
            up_count: 0,
            down_count: 0,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.bar.timestamp
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }
}

/// Latest signal state of an enriched series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Signal of the most recent bar.
    pub current_signal: Signal,
    /// Most recent Buy or Sell, Hold if the series never fired.
    pub last_non_hold_signal: Signal,
    pub last_non_hold_timestamp: Option<DateTime<Utc>>,
    pub last_non_hold_price: Option<f64>,
}

impl SignalSummary {
    /// Summarize an enriched series.
    ///
    /// Bars are ordered newest first by timestamp before scanning, so the
    /// result does not depend on the slice order. Empty input gives Hold.
    pub fn from_bars(bars: &[EnrichedBar]) -> Self {
        let mut newest_first: Vec<&EnrichedBar> = bars.iter().collect();
        // Stable sort: equal timestamps keep their later-index-first order
        // after the reverse below.
        newest_first.sort_by_key(|b| b.timestamp());
        newest_first.reverse();

        let current_signal = newest_first
            .first()
            .map(|b| b.signal)
            .unwrap_or(Signal::Hold);

        match newest_first.iter().find(|b| b.signal.is_actionable()) {
            Some(last) => Self {
                current_signal,
                last_non_hold_signal: last.signal,
                last_non_hold_timestamp: Some(last.timestamp()),
                last_non_hold_price: Some(last.close()),
            },
            None => Self {
                current_signal,
                last_non_hold_signal: Signal::Hold,
                last_non_hold_timestamp: None,
                last_non_hold_price: None,
            },
        }
    }
}

/// Full pipeline result for one bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub bars: Vec<EnrichedBar>,
    pub summary: SignalSummary,
}

impl Analysis {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Count of Buy and Sell bars in the series.
    pub fn signal_counts(&self) -> (usize, usize) {
        self.bars.iter().fold((0, 0), |(buys, sells), b| match b.signal {
            Signal::Buy => (buys + 1, sells),
            Signal::Sell => (buys, sells + 1),
            Signal::Hold => (buys, sells),
        })
    }
}

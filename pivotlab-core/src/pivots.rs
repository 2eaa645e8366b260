//! Pivot (local extremum) detection.
//!
//! Bar i is a pivot high when its high is strictly greater than the highs of
//! the `length` bars on each side; a pivot low is the mirror image on lows.
//! Ties disqualify. The first and last `length` bars never qualify because
//! their window is incomplete. A bar can be both a pivot high and a pivot low.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Per-bar pivot flags, index-aligned to the input bars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotFlags {
    pub high: Vec<bool>,
    pub low: Vec<bool>,
}

impl PivotFlags {
    /// All-false flags for `n` bars.
    pub fn none(n: usize) -> Self {
        Self {
            high: vec![false; n],
            low: vec![false; n],
        }
    }

    pub fn len(&self) -> usize {
        self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    /// Indices flagged as pivot highs.
    pub fn high_indices(&self) -> Vec<usize> {
        flagged(&self.high)
    }

    /// Indices flagged as pivot lows.
    pub fn low_indices(&self) -> Vec<usize> {
        flagged(&self.low)
    }
}

fn flagged(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect()
}

/// Symmetric look-around pivot detector.
#[derive(Debug, Clone, Copy)]
pub struct PivotDetector {
    length: usize,
}

impl PivotDetector {
    pub fn new(length: usize) -> Self {
        assert!(length >= 1, "pivot length must be >= 1");
        Self { length }
    }

    /// Minimum bars for any pivot to be detectable: `2 * length + 1`.
    pub fn min_bars(&self) -> usize {
        2 * self.length + 1
    }

    pub fn detect(&self, bars: &[Bar]) -> PivotFlags {
        if bars.len() < self.min_bars() {
            return PivotFlags::none(bars.len());
        }
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        PivotFlags {
            high: scan(&highs, self.length, |center, other| center > other),
            low: scan(&lows, self.length, |center, other| center < other),
        }
    }
}

/// Flag every index whose value beats all `length` neighbours on both sides.
///
/// `beats(center, other)` must be a strict comparison; NaN never beats
/// anything, so NaN bars are never pivots.
fn scan(values: &[f64], length: usize, beats: impl Fn(f64, f64) -> bool) -> Vec<bool> {
    let n = values.len();
    let mut flags = vec![false; n];

    if n < 2 * length + 1 {
        return flags;
    }

    for i in length..(n - length) {
        let center = values[i];
        let left = &values[i - length..i];
        let right = &values[i + 1..=i + length];
        flags[i] = left
            .iter()
            .chain(right.iter())
            .all(|&other| beats(center, other));
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    /// Bars whose high/low are given directly (close mid-range).
    fn bars_from_highs_lows(highs: &[f64], lows: &[f64]) -> Vec<Bar> {
        let mut bars = make_bars(&vec![100.0; highs.len()]);
        for (i, bar) in bars.iter_mut().enumerate() {
            bar.high = highs[i];
            bar.low = lows[i];
            bar.close = (highs[i] + lows[i]) / 2.0;
            bar.open = bar.close;
        }
        bars
    }

    #[test]
    fn single_spike_is_pivot_high() {
        // length 2: 1 2 [9] 2 1
        let bars = bars_from_highs_lows(&[1.0, 2.0, 9.0, 2.0, 1.0], &[0.0; 5]);
        let flags = PivotDetector::new(2).detect(&bars);
        assert_eq!(flags.high_indices(), vec![2]);
        // Flat lows: ties disqualify
        assert!(flags.low_indices().is_empty());
    }

    #[test]
    fn higher_bar_just_outside_window_does_not_disqualify() {
        // length 2: index 0 is higher than the centre but sits length + 1 away.
        let highs = [50.0, 1.0, 2.0, 9.0, 2.0, 1.0, 0.5];
        let flags = PivotDetector::new(2).detect(&bars_from_highs_lows(&highs, &[0.0; 7]));
        assert_eq!(flags.high_indices(), vec![3]);
    }

    #[test]
    fn lower_bar_just_outside_window_does_not_disqualify() {
        let lows = [0.5, 5.0, 4.0, 1.0, 4.0, 5.0, 6.0];
        let flags = PivotDetector::new(2).detect(&bars_from_highs_lows(&[100.0; 7], &lows));
        assert_eq!(flags.low_indices(), vec![3]);
    }

    #[test]
    fn ties_disqualify() {
        let bars = bars_from_highs_lows(&[1.0, 9.0, 9.0, 2.0, 1.0], &[0.0; 5]);
        let flags = PivotDetector::new(1).detect(&bars);
        assert!(!flags.high[1]);
        assert!(!flags.high[2]);
    }

    #[test]
    fn edges_never_flagged() {
        // Max at index 0 and min at the last index: windows incomplete.
        let highs = [10.0, 5.0, 4.0, 3.0, 2.0];
        let lows = [5.0, 4.0, 3.0, 2.0, 1.0];
        let flags = PivotDetector::new(2).detect(&bars_from_highs_lows(&highs, &lows));
        assert!(flags.high_indices().is_empty());
        assert!(flags.low_indices().is_empty());
    }

    #[test]
    fn bar_can_be_both_high_and_low() {
        // Outside bar at index 1: highest high and lowest low.
        let highs = [5.0, 10.0, 5.0];
        let lows = [4.0, 1.0, 4.0];
        let flags = PivotDetector::new(1).detect(&bars_from_highs_lows(&highs, &lows));
        assert!(flags.high[1]);
        assert!(flags.low[1]);
    }

    #[test]
    fn too_short_series_has_no_pivots() {
        let bars = bars_from_highs_lows(&[1.0, 9.0, 1.0], &[0.0; 3]);
        let flags = PivotDetector::new(2).detect(&bars);
        assert_eq!(flags, PivotFlags::none(3));
    }

    #[test]
    fn min_bars_is_two_sides_plus_center() {
        assert_eq!(PivotDetector::new(14).min_bars(), 29);
    }
}

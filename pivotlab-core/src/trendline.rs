//! Adaptive trendlines anchored at pivots.
//!
//! The upper bound starts at a pivot high and decays downward by a fixed
//! per-bar slope until the next pivot high resets it; the lower bound is the
//! mirror image, rising from each pivot low. The slope is ATR / length,
//! captured at the bar of the anchoring pivot and held until the next one.
//!
//! Breakout counters tick when a close crosses the previous bar's bound on a
//! bar that is not itself a pivot of the same side.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::pivots::PivotFlags;

/// Bound series and breakout counters, index-aligned to the input bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trendlines {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub up_count: Vec<u64>,
    pub down_count: Vec<u64>,
}

impl Trendlines {
    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }
}

/// Carry-forward state of one scan step.
#[derive(Debug, Clone, Copy)]
struct TrendState {
    high_slope: f64,
    low_slope: f64,
    upper: f64,
    lower: f64,
    up_count: u64,
    down_count: u64,
}

/// Builds trendlines from bars, pivot flags and an ATR series.
#[derive(Debug, Clone, Copy)]
pub struct TrendlineEngine {
    length: usize,
}

impl TrendlineEngine {
    pub fn new(length: usize) -> Self {
        assert!(length >= 1, "trendline length must be >= 1");
        Self { length }
    }

    /// Per-bar slope: ATR / length, 0 where ATR is undefined.
    pub fn slopes(&self, atr: &[Option<f64>]) -> Vec<f64> {
        let length = self.length as f64;
        atr.iter()
            .map(|a| a.map_or(0.0, |v| v / length))
            .collect()
    }

    /// Build the channel.
    ///
    /// `pivots` and `atr` must be index-aligned with `bars`; missing trailing
    /// entries are treated as "no pivot" and "no ATR".
    pub fn build(&self, bars: &[Bar], pivots: &PivotFlags, atr: &[Option<f64>]) -> Trendlines {
        let n = bars.len();
        let mut out = Trendlines {
            upper: Vec::with_capacity(n),
            lower: Vec::with_capacity(n),
            up_count: Vec::with_capacity(n),
            down_count: Vec::with_capacity(n),
        };

        let Some(first) = bars.first() else {
            return out;
        };

        let slopes = self.slopes(atr);
        let slope_at = |i: usize| slopes.get(i).copied().unwrap_or(0.0);
        let pivot_high = |i: usize| pivots.high.get(i).copied().unwrap_or(false);
        let pivot_low = |i: usize| pivots.low.get(i).copied().unwrap_or(false);

        let mut state = TrendState {
            high_slope: slope_at(0),
            low_slope: slope_at(0),
            upper: first.high,
            lower: first.low,
            up_count: 0,
            down_count: 0,
        };
        out.push(&state);

        for (i, bar) in bars.iter().enumerate().skip(1) {
            let (is_high, is_low) = (pivot_high(i), pivot_low(i));
            let (prev_upper, prev_lower) = (state.upper, state.lower);

            if is_high {
                state.high_slope = slope_at(i);
                state.upper = bar.high;
            } else {
                state.upper = prev_upper - state.high_slope;
            }

            if is_low {
                state.low_slope = slope_at(i);
                state.lower = bar.low;
            } else {
                state.lower = prev_lower + state.low_slope;
            }

            if !is_high && bar.close > prev_upper {
                state.up_count += 1;
            }
            if !is_low && bar.close < prev_lower {
                state.down_count += 1;
            }

            out.push(&state);
        }

        out
    }
}

impl Trendlines {
    fn push(&mut self, state: &TrendState) {
        self.upper.push(state.upper);
        self.lower.push(state.lower);
        self.up_count.push(state.up_count);
        self.down_count.push(state.down_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn flags(n: usize, highs: &[usize], lows: &[usize]) -> PivotFlags {
        let mut f = PivotFlags::none(n);
        for &i in highs {
            f.high[i] = true;
        }
        for &i in lows {
            f.low[i] = true;
        }
        f
    }

    #[test]
    fn slopes_divide_atr_by_length() {
        let engine = TrendlineEngine::new(14);
        let slopes = engine.slopes(&[None, Some(14.0), Some(7.0)]);
        assert_eq!(slopes, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn bounds_seed_at_first_bar() {
        let bars = make_bars(&[100.0, 100.0, 100.0]);
        let lines = TrendlineEngine::new(2).build(&bars, &PivotFlags::none(3), &[None; 3]);
        // make_bars: high = 101, low = 99 for a flat series; zero slope holds them.
        assert_eq!(lines.upper, vec![101.0, 101.0, 101.0]);
        assert_eq!(lines.lower, vec![99.0, 99.0, 99.0]);
        assert_eq!(lines.up_count, vec![0, 0, 0]);
        assert_eq!(lines.down_count, vec![0, 0, 0]);
    }

    #[test]
    fn upper_decays_and_resets_at_pivot_high() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let atr = vec![Some(2.0); 5]; // slope = 1.0 with length 2
        let pivots = flags(5, &[2], &[]);
        let lines = TrendlineEngine::new(2).build(&bars, &pivots, &atr);

        // seed 101, decays 1/bar, resets to high[2] = 101 at the pivot
        assert_approx(lines.upper[1], 100.0, DEFAULT_EPSILON);
        assert_approx(lines.upper[2], 101.0, DEFAULT_EPSILON);
        assert_approx(lines.upper[3], 100.0, DEFAULT_EPSILON);
        assert_approx(lines.upper[4], 99.0, DEFAULT_EPSILON);
    }

    #[test]
    fn lower_rises_from_its_own_previous_value() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let atr = vec![Some(4.0); 4]; // slope = 2.0 with length 2
        let lines = TrendlineEngine::new(2).build(&bars, &PivotFlags::none(4), &atr);
        assert_eq!(lines.lower, vec![99.0, 101.0, 103.0, 105.0]);
    }

    #[test]
    fn carried_slope_is_captured_at_pivot() {
        let bars = make_bars(&[100.0; 5]);
        // ATR changes after the pivot at 1; the carried slope must not follow it.
        let atr = vec![Some(2.0), Some(4.0), Some(40.0), Some(40.0), Some(40.0)];
        let pivots = flags(5, &[1], &[]);
        let lines = TrendlineEngine::new(2).build(&bars, &pivots, &atr);
        // slope at pivot = 4/2 = 2
        assert_approx(lines.upper[1], 101.0, DEFAULT_EPSILON);
        assert_approx(lines.upper[2], 99.0, DEFAULT_EPSILON);
        assert_approx(lines.upper[3], 97.0, DEFAULT_EPSILON);
    }

    #[test]
    fn close_above_previous_upper_ticks_up_count() {
        // Closes rise above the flat upper bound of 101.
        let bars = make_bars(&[100.0, 100.0, 102.0, 103.0]);
        let lines = TrendlineEngine::new(2).build(&bars, &PivotFlags::none(4), &[None; 4]);
        assert_eq!(lines.up_count, vec![0, 0, 1, 2]);
        assert_eq!(lines.down_count, vec![0, 0, 0, 0]);
    }

    #[test]
    fn breakout_on_pivot_bar_does_not_count() {
        let bars = make_bars(&[100.0, 100.0, 102.0]);
        let pivots = flags(3, &[2], &[]);
        let lines = TrendlineEngine::new(1).build(&bars, &pivots, &[None; 3]);
        assert_eq!(lines.up_count, vec![0, 0, 0]);
    }

    #[test]
    fn breakdown_on_pivot_low_bar_does_not_count() {
        // close 97 is below the previous lower bound of 99, but bar 2 anchors a new low.
        let bars = make_bars(&[100.0, 100.0, 97.0]);
        let pivots = flags(3, &[], &[2]);
        let lines = TrendlineEngine::new(1).build(&bars, &pivots, &[None; 3]);
        assert_eq!(lines.down_count, vec![0, 0, 0]);
        assert_eq!(lines.lower[2], 96.0);
    }

    #[test]
    fn close_below_previous_lower_ticks_down_count() {
        let bars = make_bars(&[100.0, 100.0, 97.0]);
        let lines = TrendlineEngine::new(2).build(&bars, &PivotFlags::none(3), &[None; 3]);
        assert_eq!(lines.down_count, vec![0, 0, 1]);
    }

    #[test]
    fn empty_input_builds_empty_lines() {
        let lines = TrendlineEngine::new(14).build(&[], &PivotFlags::none(0), &[]);
        assert!(lines.is_empty());
    }
}

//! End-to-end pipeline: bars in, enriched bars and a signal summary out.
//!
//! Stage order:
//! 1. RSI, ATR, AMA and pivot flags (independent, computed in parallel)
//! 2. Trendlines from ATR + pivots
//! 3. Signals from the breakout counters + RSI veto
//!
//! Every call recomputes from scratch; nothing is cached between calls.

use tracing::debug;

use crate::domain::{bar, Analysis, Bar, EnrichedBar, Signal, SignalSummary};
use crate::indicators::{ama_series, atr_series, rsi_series};
use crate::params::{
    AMA_FAST_FACTOR, AMA_SLOW_FACTOR, AMA_WINDOW, ATR_PERIOD, MIN_BARS, PIVOT_LENGTH, RSI_PERIOD,
};
use crate::pivots::{PivotDetector, PivotFlags};
use crate::signal::derive_signals;
use crate::trendline::{TrendlineEngine, Trendlines};

/// Run the full pipeline over an ascending bar series.
pub fn analyze(bars: &[Bar]) -> Analysis {
    let enriched = enrich(bars);
    let summary = SignalSummary::from_bars(&enriched);
    Analysis {
        bars: enriched,
        summary,
    }
}

/// Derive every per-bar field. Output is index-aligned with `bars`.
///
/// Series shorter than `MIN_BARS` come back bare: no indicators, no pivots,
/// all Hold.
pub fn enrich(bars: &[Bar]) -> Vec<EnrichedBar> {
    let n = bars.len();
    if n < MIN_BARS {
        debug!(bars = n, min_bars = MIN_BARS, "series below warm-up, returning bare bars");
        return bars.iter().cloned().map(EnrichedBar::bare).collect();
    }

    let highs = bar::highs(bars);
    let lows = bar::lows(bars);
    let closes = bar::closes(bars);

    let ((rsi, atr), (ama, pivots)) = rayon::join(
        || {
            (
                rsi_series(&closes, RSI_PERIOD),
                atr_series(&highs, &lows, &closes, ATR_PERIOD),
            )
        },
        || {
            (
                ama_series(&closes, AMA_WINDOW, AMA_FAST_FACTOR, AMA_SLOW_FACTOR),
                PivotDetector::new(PIVOT_LENGTH).detect(bars),
            )
        },
    );

    let lines = TrendlineEngine::new(PIVOT_LENGTH).build(bars, &pivots, &atr);
    let signals = derive_signals(&lines.up_count, &lines.down_count, &rsi);

    debug!(
        bars = n,
        pivot_highs = pivots.high_indices().len(),
        pivot_lows = pivots.low_indices().len(),
        up_breakouts = lines.up_count.last().copied().unwrap_or(0),
        down_breakouts = lines.down_count.last().copied().unwrap_or(0),
        "pipeline complete"
    );

    assemble(bars, &rsi, &atr, &ama, &pivots, &lines, &signals)
}

fn assemble(
    bars: &[Bar],
    rsi: &[Option<f64>],
    atr: &[Option<f64>],
    ama: &[Option<f64>],
    pivots: &PivotFlags,
    lines: &Trendlines,
    signals: &[Signal],
) -> Vec<EnrichedBar> {
    bars.iter()
        .enumerate()
        .map(|(i, b)| EnrichedBar {
            bar: b.clone(),
            rsi: rsi[i],
            atr: atr[i],
            ama: ama[i],
            upper_bound: Some(lines.upper[i]),
            lower_bound: Some(lines.lower[i]),
            is_pivot_high: pivots.high[i],
            is_pivot_low: pivots.low[i],
            signal: signals[i],
            up_count: lines.up_count[i],
            down_count: lines.down_count[i],
        })
        .collect()
}

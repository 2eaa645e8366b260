//! PivotLab Core: indicator and signal pipeline over OHLCV bars.
//!
//! This crate turns an ascending bar series into:
//! - RSI, ATR and an adaptive moving average per bar
//! - Pivot high/low flags from a symmetric look-around window
//! - An ATR-sloped channel anchored at the latest pivots, with breakout counters
//! - Buy/Sell/Hold signals from breakout edges, vetoed at RSI extremes
//! - A summary of the current and last actionable signal
//!
//! Everything is a pure function of the input: no I/O in the pipeline, no
//! state between calls.

pub mod domain;
pub mod export;
pub mod fingerprint;
pub mod indicators;
pub mod params;
pub mod pipeline;
pub mod pivots;
pub mod signal;
pub mod synthetic;
pub mod trendline;

pub use domain::{Analysis, Bar, EnrichedBar, Signal, SignalSummary};
pub use pipeline::{analyze, enrich};

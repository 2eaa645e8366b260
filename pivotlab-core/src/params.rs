//! Fixed pipeline parameters.
//!
//! These are constants of the method, not tuning knobs. Every engine takes
//! its period as an argument so it can be tested in isolation, but the
//! pipeline always runs with the values below.

/// RSI lookback (Wilder smoothing).
pub const RSI_PERIOD: usize = 14;

/// ATR lookback (Wilder smoothing).
pub const ATR_PERIOD: usize = 14;

/// AMA rolling-volatility window and base EMA span.
pub const AMA_WINDOW: usize = 14;

/// Fast EMA span = `AMA_FAST_FACTOR * AMA_WINDOW`.
pub const AMA_FAST_FACTOR: f64 = 2.0;

/// Slow EMA span = `AMA_SLOW_FACTOR * AMA_WINDOW`.
pub const AMA_SLOW_FACTOR: f64 = 30.0;

/// Look-around on each side for pivot detection, also the ATR slope divisor.
pub const PIVOT_LENGTH: usize = 14;

/// Series shorter than this produce an all-Hold, indicator-free result.
pub const MIN_BARS: usize = 30;

/// Buy signals are vetoed above this RSI.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Sell signals are vetoed below this RSI.
pub const RSI_OVERSOLD: f64 = 30.0;

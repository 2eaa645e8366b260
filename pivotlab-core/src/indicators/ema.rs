//! Exponential Moving Average helpers.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1]
//! Seed: EMA[0] = x[0] (no SMA warm-up), so every index carries a value.

/// Standard EMA multiplier for a span: 2 / (span + 1).
pub fn ema_multiplier(span: f64) -> f64 {
    2.0 / (span + 1.0)
}

/// EMA seeded at the first value and recurred over the whole series.
pub fn seeded_ema(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let mut iter = values.iter();

    let Some(&first) = iter.next() else {
        return result;
    };
    result.push(first);

    let mut prev = first;
    for &v in iter {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

//! Content fingerprints for bar series and analyses.
//!
//! BLAKE3 over a canonical byte encoding (little-endian f64 bits, RFC 3339
//! timestamps, fixed field order). Equal inputs always produce equal hashes,
//! which is how repeated runs are checked for reproducibility.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Analysis, Bar, EnrichedBar, Signal};

/// Hex-encoded BLAKE3 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn hash_bar(hasher: &mut blake3::Hasher, bar: &Bar) {
    hasher.update(bar.timestamp.to_rfc3339().as_bytes());
    hasher.update(&bar.open.to_le_bytes());
    hasher.update(&bar.high.to_le_bytes());
    hasher.update(&bar.low.to_le_bytes());
    hasher.update(&bar.close.to_le_bytes());
    hasher.update(&bar.volume.to_le_bytes());
}

fn hash_opt(hasher: &mut blake3::Hasher, v: Option<f64>) {
    match v {
        Some(x) => {
            hasher.update(&[1]);
            hasher.update(&x.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn signal_tag(s: Signal) -> u8 {
    match s {
        Signal::Buy => 1,
        Signal::Sell => 2,
        Signal::Hold => 0,
    }
}

fn hash_enriched(hasher: &mut blake3::Hasher, eb: &EnrichedBar) {
    hash_bar(hasher, &eb.bar);
    hash_opt(hasher, eb.rsi);
    hash_opt(hasher, eb.atr);
    hash_opt(hasher, eb.ama);
    hash_opt(hasher, eb.upper_bound);
    hash_opt(hasher, eb.lower_bound);
    hasher.update(&[
        eb.is_pivot_high as u8,
        eb.is_pivot_low as u8,
        signal_tag(eb.signal),
    ]);
    hasher.update(&eb.up_count.to_le_bytes());
    hasher.update(&eb.down_count.to_le_bytes());
}

/// Hash of the raw input series.
pub fn dataset_hash(bars: &[Bar]) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hash_bar(&mut hasher, bar);
    }
    Fingerprint(hasher.finalize().to_hex().to_string())
}

/// Hash of every enriched bar plus the summary.
pub fn fingerprint(analysis: &Analysis) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    for eb in &analysis.bars {
        hash_enriched(&mut hasher, eb);
    }

    let s = &analysis.summary;
    hasher.update(&[signal_tag(s.current_signal), signal_tag(s.last_non_hold_signal)]);
    match s.last_non_hold_timestamp {
        Some(ts) => hasher.update(ts.to_rfc3339().as_bytes()),
        None => hasher.update(b"-"),
    };
    hash_opt(&mut hasher, s.last_non_hold_price);

    Fingerprint(hasher.finalize().to_hex().to_string())
}

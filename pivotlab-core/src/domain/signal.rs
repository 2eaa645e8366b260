//! Discrete per-bar trading signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buy/Sell/Hold classification of a single bar.
///
/// A signal marks the bar where a breakout edge occurred. It is not a
/// position: consecutive bars after a Buy are Hold until the next edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    /// Check if the signal asks for action (Buy or Sell).
    pub fn is_actionable(&self) -> bool {
        matches!(self, Signal::Buy | Signal::Sell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

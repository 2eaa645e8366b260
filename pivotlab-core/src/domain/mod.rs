//! Domain types for PivotLab

pub mod bar;
pub mod enriched;
pub mod signal;

pub use bar::Bar;
pub use enriched::{Analysis, EnrichedBar, SignalSummary};
pub use signal::Signal;

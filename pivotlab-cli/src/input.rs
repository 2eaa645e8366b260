//! CSV bar loader.
//!
//! Expects a header `timestamp,open,high,low,close,volume` with RFC 3339
//! timestamps. Rows are kept in file order; the pipeline assumes ascending
//! timestamps, so out-of-order or inconsistent bars are reported as warnings
//! rather than silently fixed. Non-finite prices or volumes are rejected:
//! JSON artifacts cannot represent them.

use chrono::{DateTime, Utc};
use pivotlab_core::domain::Bar;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("open bar file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid RFC 3339 timestamp '{value}': {source}")]
    Timestamp {
        row: usize,
        value: String,
        source: chrono::ParseError,
    },

    #[error("row {row}: {field} is not a finite number ({value})")]
    NonFinite {
        row: usize,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Read bars from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let bars = read_bars(file)?;
    info!(path = %path.display(), bars = bars.len(), "loaded bars");
    Ok(bars)
}

/// Read bars from any CSV source.
pub fn read_bars<R: std::io::Read>(reader: R) -> Result<Vec<Bar>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (i, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        let line = i + 2;
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|source| LoadError::Timestamp {
                row: line,
                value: row.timestamp.clone(),
                source,
            })?
            .with_timezone(&Utc);
        let fields = [
            ("open", row.open),
            ("high", row.high),
            ("low", row.low),
            ("close", row.close),
            ("volume", row.volume),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LoadError::NonFinite {
                row: line,
                field,
                value,
            });
        }
        bars.push(Bar::new(
            timestamp, row.open, row.high, row.low, row.close, row.volume,
        ));
    }

    Ok(bars)
}

/// Data quality problems the pipeline will not correct. Each one is also
/// logged at `warn`.
pub fn quality_warnings(bars: &[Bar]) -> Vec<String> {
    let mut warnings = Vec::new();

    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            warn!(index = i, timestamp = %bar.timestamp, "bar fails OHLCV sanity check");
            warnings.push(format!("bar {i} ({}) fails OHLCV sanity check", bar.timestamp));
        }
    }

    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            warn!(
                index = i + 1,
                timestamp = %pair[1].timestamp,
                previous = %pair[0].timestamp,
                "timestamps not strictly ascending"
            );
            warnings.push(format!(
                "bar {} ({}) is not after bar {} ({})",
                i + 1,
                pair[1].timestamp,
                i,
                pair[0].timestamp
            ));
        }
    }

    warnings
}

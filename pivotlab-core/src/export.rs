//! Export of JSON and CSV artifacts for an analysis.
//!
//! - **JSON**: full round-trip serialization wrapped with a schema version
//! - **CSV**: one row per enriched bar for spreadsheets and charting tools
//!
//! Unknown (newer) schema versions are rejected on import.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Analysis, EnrichedBar};

/// Current artifact schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported schema version {found} (max supported: {max})")]
    UnsupportedSchema { found: u32, max: u32 },

    #[error("CSV output is not valid UTF-8")]
    Utf8,

    #[error("bar {index} ({timestamp}) has a non-finite value; JSON cannot carry it")]
    NonFinite { index: usize, timestamp: String },
}

/// On-disk JSON envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisArtifact {
    pub schema_version: u32,
    pub symbol: String,
    pub fingerprint: String,
    pub analysis: Analysis,
}

impl AnalysisArtifact {
    pub fn new(symbol: impl Into<String>, analysis: Analysis) -> Self {
        let fingerprint = crate::fingerprint::fingerprint(&analysis).to_string();
        Self {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.into(),
            fingerprint,
            analysis,
        }
    }
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize an artifact to pretty JSON.
///
/// JSON has no NaN or infinity: serde_json would write them as `null`, which
/// either fails to import or comes back as a missing value. Such analyses are
/// refused instead.
pub fn export_json(artifact: &AnalysisArtifact) -> Result<String, ExportError> {
    if let Some(index) = first_non_finite(&artifact.analysis.bars) {
        return Err(ExportError::NonFinite {
            index,
            timestamp: artifact.analysis.bars[index].timestamp().to_rfc3339(),
        });
    }
    Ok(serde_json::to_string_pretty(artifact)?)
}

fn first_non_finite(bars: &[EnrichedBar]) -> Option<usize> {
    bars.iter().position(|eb| {
        let b = &eb.bar;
        let prices = [b.open, b.high, b.low, b.close, b.volume];
        let derived = [eb.rsi, eb.atr, eb.ama, eb.upper_bound, eb.lower_bound];
        prices.iter().any(|v| !v.is_finite())
            || derived.iter().flatten().any(|v| !v.is_finite())
    })
}

/// Deserialize an artifact from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisArtifact, ExportError> {
    let artifact: AnalysisArtifact = serde_json::from_str(json)?;
    if artifact.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: artifact.schema_version,
            max: SCHEMA_VERSION,
        });
    }
    Ok(artifact)
}

// ─── CSV ────────────────────────────────────────────────────────────

const CSV_HEADER: [&str; 16] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "rsi",
    "atr",
    "ama",
    "upper_bound",
    "lower_bound",
    "is_pivot_high",
    "is_pivot_low",
    "signal",
    "up_count",
    "down_count",
];

fn opt_cell(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}

/// Export enriched bars as CSV. Absent indicator values are empty cells.
pub fn export_enriched_csv(bars: &[EnrichedBar]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for eb in bars {
        let b = &eb.bar;
        wtr.write_record([
            b.timestamp.to_rfc3339(),
            format!("{:.6}", b.open),
            format!("{:.6}", b.high),
            format!("{:.6}", b.low),
            format!("{:.6}", b.close),
            format!("{:.2}", b.volume),
            opt_cell(eb.rsi),
            opt_cell(eb.atr),
            opt_cell(eb.ama),
            opt_cell(eb.upper_bound),
            opt_cell(eb.lower_bound),
            eb.is_pivot_high.to_string(),
            eb.is_pivot_low.to_string(),
            eb.signal.to_string(),
            eb.up_count.to_string(),
            eb.down_count.to_string(),
        ])?;
    }

    let data = wtr.into_inner().map_err(|e| ExportError::Io {
        path: PathBuf::from("<memory>"),
        source: e.into_error(),
    })?;
    String::from_utf8(data).map_err(|_| ExportError::Utf8)
}

// ─── Artifact files ─────────────────────────────────────────────────

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `analysis.json` into `dir`, creating it if needed.
pub fn save_json(artifact: &AnalysisArtifact, dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join("analysis.json");
    write_file(&path, &export_json(artifact)?)?;
    Ok(path)
}

/// Write `enriched.csv` into `dir`, creating it if needed.
pub fn save_csv(bars: &[EnrichedBar], dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join("enriched.csv");
    write_file(&path, &export_enriched_csv(bars)?)?;
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

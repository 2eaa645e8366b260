//! Optional TOML settings for the `analyze` command.
//!
//! ```toml
//! symbol = "SPY"
//! output_dir = "results"
//! format = "both"      # json | csv | both
//! log_level = "debug"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Artifact formats written by `analyze`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn wants_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn wants_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// File-level settings. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub symbol: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Merge command-line overrides on top of file values.
    pub fn resolve(
        &self,
        symbol: Option<String>,
        format: Option<OutputFormat>,
        output_dir: Option<PathBuf>,
        fallback_symbol: &str,
    ) -> Settings {
        Settings {
            symbol: symbol
                .or_else(|| self.symbol.clone())
                .unwrap_or_else(|| fallback_symbol.to_string()),
            format: format.or(self.format).unwrap_or_default(),
            output_dir: output_dir
                .or_else(|| self.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("results")),
        }
    }
}

/// Effective settings for one `analyze` run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub symbol: String,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

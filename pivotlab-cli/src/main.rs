//! PivotLab CLI: analyze bar files and fingerprint runs.
//!
//! Commands:
//! - `analyze`: run the pivot/trendline signal pipeline on a CSV file or a
//!   synthetic series, print the signal summary and write artifacts
//! - `fingerprint`: print the dataset hash and analysis fingerprint of a CSV file

mod config;
mod input;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pivotlab_core::export::{save_csv, save_json, AnalysisArtifact};
use pivotlab_core::fingerprint::{dataset_hash, fingerprint};
use pivotlab_core::synthetic::{default_start, generate_bars};
use pivotlab_core::{analyze, Analysis, Bar};

use config::{CliConfig, OutputFormat, Settings};
use input::{load_bars, quality_warnings};

#[derive(Parser)]
#[command(
    name = "pivotlab",
    about = "PivotLab CLI: pivot trendline breakout signals over OHLCV bars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signal pipeline and write artifacts.
    Analyze {
        /// CSV file with header timestamp,open,high,low,close,volume.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Use a deterministic synthetic random walk instead of a file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Number of synthetic bars.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// Seed string for the synthetic walk.
        #[arg(long, default_value = "SYNTH")]
        seed_symbol: String,

        /// Symbol label for artifacts. Defaults to the file stem or seed.
        #[arg(long)]
        symbol: Option<String>,

        /// Artifact format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory. Defaults to ./results.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Optional TOML settings file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the dataset hash and analysis fingerprint of a CSV file.
    Fingerprint {
        /// CSV file with header timestamp,open,high,low,close,volume.
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            synthetic,
            bars,
            seed_symbol,
            symbol,
            format,
            output_dir,
            config,
        } => {
            let file_config = CliConfig::load(config.as_deref())
                .context("failed to load --config")?;
            init_tracing(file_config.log_level.as_deref());

            let source = source_from_flags(input, synthetic, seed_symbol, bars)?;
            let settings = file_config.resolve(symbol, format, output_dir, &source.label());
            run_analyze(&source, &settings)
        }
        Commands::Fingerprint { input } => {
            init_tracing(None);
            run_fingerprint(&input)
        }
    }
}

/// `RUST_LOG` wins, then the config file's level, then `info`.
fn init_tracing(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exactly one of `--input` and `--synthetic` must be given.
fn source_from_flags(
    input: Option<PathBuf>,
    synthetic: bool,
    seed: String,
    count: usize,
) -> Result<Source> {
    match (input, synthetic) {
        (Some(path), false) => Ok(Source::File(path)),
        (None, true) => Ok(Source::Synthetic { seed, count }),
        (None, false) => bail!("one of --input or --synthetic is required"),
        (Some(_), true) => bail!("--input and --synthetic are mutually exclusive"),
    }
}

enum Source {
    File(PathBuf),
    Synthetic { seed: String, count: usize },
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bars".to_string()),
            Source::Synthetic { seed, .. } => seed.clone(),
        }
    }

    fn load(&self) -> Result<Vec<Bar>> {
        match self {
            Source::File(path) => {
                load_bars(path).with_context(|| format!("failed to load {}", path.display()))
            }
            Source::Synthetic { seed, count } => {
                info!(seed = %seed, count, "generating synthetic bars");
                Ok(generate_bars(seed, *count, default_start()))
            }
        }
    }

    fn is_synthetic(&self) -> bool {
        matches!(self, Source::Synthetic { .. })
    }
}

fn run_analyze(source: &Source, settings: &Settings) -> Result<()> {
    let bars = source.load()?;
    let warnings = quality_warnings(&bars);

    let analysis = analyze(&bars);
    let artifact = AnalysisArtifact::new(settings.symbol.clone(), analysis);
    let dataset = dataset_hash(&bars);
    info!(
        symbol = %settings.symbol,
        bars = bars.len(),
        dataset = dataset.short(),
        "analysis complete"
    );

    print_summary(&settings.symbol, &artifact, source.is_synthetic(), &warnings);

    let run_dir = settings.output_dir.join(&settings.symbol);
    if settings.format.wants_json() {
        let path = save_json(&artifact, &run_dir).context("failed to write JSON artifact")?;
        println!("JSON saved to: {}", path.display());
    }
    if settings.format.wants_csv() {
        let path = save_csv(&artifact.analysis.bars, &run_dir)
            .context("failed to write CSV artifact")?;
        println!("CSV saved to:  {}", path.display());
    }

    Ok(())
}

fn run_fingerprint(path: &Path) -> Result<()> {
    let bars = load_bars(path).with_context(|| format!("failed to load {}", path.display()))?;
    let analysis = analyze(&bars);
    let dataset = dataset_hash(&bars);
    let result = fingerprint(&analysis);
    info!(
        dataset = dataset.short(),
        analysis = result.short(),
        "fingerprinted {}",
        path.display()
    );
    println!("dataset:     {dataset}");
    println!("analysis:    {result}");
    Ok(())
}

fn print_summary(symbol: &str, artifact: &AnalysisArtifact, synthetic: bool, warnings: &[String]) {
    let analysis: &Analysis = &artifact.analysis;
    let summary = &analysis.summary;
    let (buys, sells) = analysis.signal_counts();

    println!();
    println!("=== Signal Summary ===");
    println!("Symbol:         {symbol}");
    if let (Some(first), Some(last)) = (analysis.bars.first(), analysis.bars.last()) {
        println!(
            "Period:         {} to {}",
            first.timestamp().format("%Y-%m-%d"),
            last.timestamp().format("%Y-%m-%d")
        );
    }
    println!("Bars:           {}", analysis.len());
    println!("Buys / Sells:   {buys} / {sells}");
    println!();
    println!("Current:        {}", summary.current_signal);
    println!("Last Signal:    {}", summary.last_non_hold_signal);
    match (summary.last_non_hold_timestamp, summary.last_non_hold_price) {
        (Some(ts), Some(price)) => {
            println!("  at            {}", ts.to_rfc3339());
            println!("  price         {price:.2}");
        }
        _ => println!("  (no actionable signal)"),
    }
    if let Some(last) = analysis.bars.last() {
        println!();
        println!("--- Latest Bar ---");
        println!("Close:          {:.2}", last.close());
        println!("RSI:            {}", fmt_opt(last.rsi, 2));
        println!("ATR:            {}", fmt_opt(last.atr, 4));
        println!("AMA:            {}", fmt_opt(last.ama, 4));
        println!("Upper Bound:    {}", fmt_opt(last.upper_bound, 4));
        println!("Lower Bound:    {}", fmt_opt(last.lower_bound, 4));
        println!("Breakouts:      {} up / {} down", last.up_count, last.down_count);
    }
    println!();
    println!("Fingerprint:    {}", artifact.fingerprint);
    if synthetic {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
    for warn in warnings {
        println!("WARNING: {warn}");
    }
    println!();
}

fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) => format!("{x:.decimals$}"),
        None => "-".to_string(),
    }
}

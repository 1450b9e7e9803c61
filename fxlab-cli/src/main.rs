//! FxLab CLI — backtest and synthetic-data commands.
//!
//! Commands:
//! - `backtest` — run the monthly walk-forward over cached candle
//!   partitions and write summary + manifest JSON per symbol
//! - `synth` — generate a deterministic synthetic candle partition

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fxlab_core::data::{dataset_hash, load_partition_dir, synthetic_candles, write_partition};
use fxlab_core::engine::{monthly_walkforward, WalkForwardSummary};

mod config;
mod manifest;

use config::RunConfig;
use manifest::{write_manifest, RunManifest};

#[derive(Parser)]
#[command(name = "fxlab", about = "FxLab CLI — FX walk-forward backtest toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monthly walk-forward backtest over candle partitions.
    Backtest {
        /// Path to a TOML run config (mutually exclusive with the flags below).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Root of the candle partition layout.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Symbol to backtest (repeat for several; they run in parallel).
        #[arg(long)]
        symbol: Vec<String>,

        /// Horizon preset: 30m (6 bars) or 2h (24 bars).
        #[arg(long, default_value = "30m")]
        horizon: String,

        /// Output directory for summary and manifest JSON.
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,
    },
    /// Generate deterministic synthetic candles into the partition layout.
    Synth {
        /// Root of the candle partition layout.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Symbol directory to write.
        #[arg(long, default_value = "GBPUSD")]
        symbol: String,

        /// Number of one-minute candles.
        #[arg(long, default_value_t = 200_000)]
        rows: usize,

        /// RNG seed — same seed, same series.
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            config,
            data_dir,
            symbol,
            horizon,
            out_dir,
        } => run_backtest_cmd(config, data_dir, symbol, horizon, out_dir),
        Commands::Synth {
            data_dir,
            symbol,
            rows,
            seed,
        } => run_synth_cmd(&data_dir, &symbol, rows, seed),
    }
}

fn run_backtest_cmd(
    config_path: Option<PathBuf>,
    data_dir: PathBuf,
    symbols: Vec<String>,
    horizon: String,
    out_dir: PathBuf,
) -> Result<()> {
    let run_config = if let Some(path) = config_path {
        if !symbols.is_empty() {
            bail!("--config and --symbol are mutually exclusive");
        }
        RunConfig::from_file(&path)?
    } else {
        if symbols.is_empty() {
            bail!("one of --config or --symbol is required");
        }
        let config = RunConfig {
            data_dir,
            symbols,
            horizon,
            out_dir,
        };
        config.validate()?;
        config
    };

    let horizon_bars = run_config.horizon_bars()?;
    let run_id = run_config.run_id();

    std::fs::create_dir_all(&run_config.out_dir).with_context(|| {
        format!(
            "failed to create output dir: {}",
            run_config.out_dir.display()
        )
    })?;

    let outcomes: Vec<(String, Result<WalkForwardSummary>)> = run_config
        .symbols
        .par_iter()
        .map(|symbol| {
            let outcome = run_symbol(&run_config, symbol, horizon_bars, &run_id);
            (symbol.clone(), outcome)
        })
        .collect();

    let mut failed = false;
    for (symbol, outcome) in &outcomes {
        match outcome {
            Ok(summary) => print_summary(symbol, horizon_bars, summary),
            Err(err) => {
                eprintln!("Error for {symbol}: {err:#}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }

    println!("Results saved to: {}", run_config.out_dir.display());
    Ok(())
}

fn run_symbol(
    config: &RunConfig,
    symbol: &str,
    horizon_bars: usize,
    run_id: &str,
) -> Result<WalkForwardSummary> {
    let candles = load_partition_dir(&config.data_dir, symbol)
        .with_context(|| format!("failed to load candles for {symbol}"))?;
    let data_hash = dataset_hash(&candles).context("failed to hash dataset")?;

    let start = Instant::now();
    let summary = monthly_walkforward(&candles, horizon_bars)
        .with_context(|| format!("walk-forward failed for {symbol}"))?;
    let duration_secs = start.elapsed().as_secs_f64();

    let summary_path = config.out_dir.join(format!("{symbol}.json"));
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    let manifest = RunManifest::new(
        run_id.to_string(),
        symbol.to_string(),
        horizon_bars,
        candles.len(),
        data_hash,
        duration_secs,
        &summary,
    );
    let manifest_path = config.out_dir.join(format!("{symbol}.manifest.json"));
    write_manifest(&manifest_path, &manifest)?;

    Ok(summary)
}

fn run_synth_cmd(data_dir: &Path, symbol: &str, rows: usize, seed: u64) -> Result<()> {
    if rows == 0 {
        bail!("--rows must be at least 1");
    }

    let candles = synthetic_candles(rows, seed);
    write_partition(data_dir, symbol, &candles)
        .with_context(|| format!("failed to write partition for {symbol}"))?;

    println!(
        "Wrote {rows} synthetic candles for {symbol} under {} (seed {seed})",
        data_dir.display()
    );
    Ok(())
}

fn print_summary(symbol: &str, horizon_bars: usize, summary: &WalkForwardSummary) {
    println!();
    println!("=== Backtest Summary ===");
    println!("Symbol:         {symbol}");
    println!("Horizon:        {horizon_bars} bars");
    println!("Months:         {}", summary.months.len());
    println!("Trades:         {}", summary.trades);
    println!("P&L:            {:.6}", summary.pnl);
    println!("Win Rate:       {:.1}%", summary.winrate * 100.0);
    println!();
}

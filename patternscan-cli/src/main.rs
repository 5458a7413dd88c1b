//! PatternScan CLI — scan a universe of instruments for chart patterns.
//!
//! Commands:
//! - `scan` — run the enabled detectors over a universe, printing the
//!   notification header, per-match captions, and the run summary
//!   (or the raw report as JSON with `--json`)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use patternscan_core::config::AppConfig;
use patternscan_core::data::{
    CsvStore, MarketCapProvider, PriceProvider, StaticMarketCaps, SyntheticStore,
};
use patternscan_core::report::{instrument_caption, run_summary, scan_header};
use patternscan_core::scan::run_scan;
use patternscan_core::universe::Universe;

#[derive(Parser)]
#[command(
    name = "patternscan",
    about = "PatternScan CLI — daily chart-pattern scanner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a universe of instruments with the enabled detectors.
    Scan {
        /// Path to the TOML config file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,

        /// Path to the TOML universe file.
        #[arg(long, default_value = "universe.toml")]
        universe: PathBuf,

        /// Directory of SYMBOL.csv bar files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Optional CSV market-cap table (symbol,market_cap_krw).
        #[arg(long)]
        market_caps: Option<PathBuf>,

        /// This process's shard of the universe.
        #[arg(long, default_value_t = 0)]
        shard_index: usize,

        /// Total number of shards.
        #[arg(long, default_value_t = 1)]
        total_shards: usize,

        /// Emit the full report as JSON instead of formatted text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Use deterministic synthetic bars instead of the CSV store.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            config,
            universe,
            data_dir,
            market_caps,
            shard_index,
            total_shards,
            json,
            synthetic,
        } => run_scan_cmd(
            config,
            universe,
            data_dir,
            market_caps,
            shard_index,
            total_shards,
            json,
            synthetic,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan_cmd(
    config_path: PathBuf,
    universe_path: PathBuf,
    data_dir: PathBuf,
    market_caps_path: Option<PathBuf>,
    shard_index: usize,
    total_shards: usize,
    json: bool,
    synthetic: bool,
) -> Result<()> {
    if total_shards == 0 || shard_index >= total_shards {
        bail!("shard index {shard_index} out of range for {total_shards} shard(s)");
    }

    let cfg = AppConfig::from_file(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;
    let universe = Universe::from_file(&universe_path)
        .with_context(|| format!("load universe {}", universe_path.display()))?;

    let tickers = universe.tickers(&cfg.universe.include_markets, &cfg.universe.exclude_markets);
    let shard = Universe::shard(&tickers, shard_index, total_shards);
    info!(
        universe = tickers.len(),
        shard = shard.len(),
        shard_index,
        total_shards,
        "starting scan"
    );

    let csv_store;
    let synthetic_store;
    let provider: &dyn PriceProvider = if synthetic {
        synthetic_store = SyntheticStore::new(cfg.scan.lookback_days as usize, 0);
        &synthetic_store
    } else {
        csv_store = CsvStore::new(&data_dir);
        &csv_store
    };

    let caps = market_caps_path
        .map(|path| {
            StaticMarketCaps::from_csv_file(&path)
                .with_context(|| format!("load market caps {}", path.display()))
        })
        .transpose()?;
    let caps_ref = caps.as_ref().map(|c| c as &dyn MarketCapProvider);

    let report = run_scan(&shard, provider, caps_ref, &cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shard_info = if total_shards > 1 {
        format!("(shard {}/{}, {} symbols)", shard_index + 1, total_shards, shard.len())
    } else {
        String::new()
    };
    println!("{}", scan_header(&report.stats, Utc::now(), &shard_info));

    let mut sent = 0;
    for outcome in &report.outcomes {
        if sent >= cfg.scan.max_alerts_per_run {
            break;
        }
        println!();
        println!("{}", instrument_caption(&universe, outcome));
        sent += 1;
    }

    println!();
    println!("{}", run_summary(&report.stats, sent));
    Ok(())
}

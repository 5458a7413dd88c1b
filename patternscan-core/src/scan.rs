//! Scan orchestration — evaluate the enabled detectors over a universe.
//!
//! Each instrument is independent, so the fan-out uses rayon; everything
//! inside one instrument's evaluation stays single-threaded and pure.
//! Results are folded back in input order so a run is reproducible.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{AppConfig, ConfigError};
use crate::data::{MarketCapProvider, PriceProvider};
use crate::domain::Bar;
use crate::signals::{build_detectors, run_detectors, EvalContext, Finding};

/// Per-run statistics, one counter bump per instrument except `errors`,
/// which counts individual detector failures.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScanStats {
    pub total: u64,
    pub ok: u64,
    pub empty: u64,
    pub matched: u64,
    pub errors: u64,
    pub per_signal: BTreeMap<String, u64>,
}

/// One matched instrument: its triggered findings plus the latest bar
/// for downstream captions and charts.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub symbol: String,
    pub last_bar: Bar,
    pub findings: Vec<Finding>,
}

/// Everything a scan run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub outcomes: Vec<ScanOutcome>,
    pub stats: ScanStats,
}

enum SymbolResult {
    Empty,
    Evaluated {
        last_bar: Bar,
        findings: Vec<Finding>,
        errors: u64,
    },
}

/// Scan `symbols` against the enabled detectors.
///
/// A fetch failure or a too-short history counts the instrument as
/// empty; detector faults are counted per detector and never abort the
/// rest of the run.
pub fn run_scan(
    symbols: &[String],
    provider: &dyn PriceProvider,
    market_caps: Option<&dyn MarketCapProvider>,
    cfg: &AppConfig,
) -> Result<ScanReport, ConfigError> {
    let detectors = build_detectors(&cfg.signals)?;
    let min_bars = cfg.scan.min_history_bars;

    let evaluated: Vec<(String, SymbolResult)> = symbols
        .par_iter()
        .map(|symbol| {
            let bars = match provider.fetch(symbol) {
                Ok(bars) => bars,
                Err(error) => {
                    tracing::debug!(symbol = %symbol, %error, "fetch failed");
                    return (symbol.clone(), SymbolResult::Empty);
                }
            };
            if bars.len() < min_bars {
                return (symbol.clone(), SymbolResult::Empty);
            }
            let ctx = EvalContext {
                symbol: symbol.as_str(),
                market_caps,
            };
            let result = run_detectors(&bars, &detectors, &ctx);
            let last_bar = bars[bars.len() - 1].clone();
            (
                symbol.clone(),
                SymbolResult::Evaluated {
                    last_bar,
                    findings: result.findings,
                    errors: result.errors,
                },
            )
        })
        .collect();

    let mut stats = ScanStats {
        total: symbols.len() as u64,
        ..ScanStats::default()
    };
    let mut outcomes = Vec::new();

    for (symbol, result) in evaluated {
        match result {
            SymbolResult::Empty => stats.empty += 1,
            SymbolResult::Evaluated {
                last_bar,
                findings,
                errors,
            } => {
                stats.ok += 1;
                stats.errors += errors;
                if !findings.is_empty() {
                    stats.matched += 1;
                    for finding in &findings {
                        *stats.per_signal.entry(finding.name.clone()).or_insert(0) += 1;
                    }
                    outcomes.push(ScanOutcome {
                        symbol,
                        last_bar,
                        findings,
                    });
                }
            }
        }
    }

    tracing::info!(
        total = stats.total,
        ok = stats.ok,
        empty = stats.empty,
        matched = stats.matched,
        errors = stats.errors,
        "scan complete"
    );

    Ok(ScanReport { outcomes, stats })
}

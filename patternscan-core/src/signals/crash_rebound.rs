//! Crash-then-MA rebound — a bar that gapped hard down intraday,
//! recovered into a day-over-day gain, and closed within tolerance of at
//! least one of the configured moving averages.

use crate::config::CrashReboundConfig;
use crate::domain::Bar;
use crate::indicators::{closes, sma};

use super::{EvalContext, Finding, PatternDetector};

pub const NAME: &str = "crash_ma_rebound";

#[derive(Debug, Clone)]
pub struct CrashMaRebound {
    cfg: CrashReboundConfig,
}

impl CrashMaRebound {
    pub fn new(cfg: CrashReboundConfig) -> Self {
        Self { cfg }
    }
}

impl PatternDetector for CrashMaRebound {
    fn name(&self) -> &str {
        NAME
    }

    fn min_bars(&self) -> usize {
        self.cfg.ma_periods.iter().copied().max().unwrap_or(0) + 5
    }

    fn evaluate(&self, bars: &[Bar], _ctx: &EvalContext<'_>) -> Finding {
        let mut finding = Finding::not_triggered(NAME);
        let n = bars.len();
        if n < self.min_bars() || n < 2 {
            return finding;
        }

        let last = &bars[n - 1];
        let prev = &bars[n - 2];

        let dod_change = last.close / prev.close - 1.0;
        let drawdown = last.low / last.open - 1.0;
        let rebound = last.close / last.low - 1.0;

        if !(dod_change >= self.cfg.min_dod_close_change) {
            return finding;
        }
        if !(drawdown <= self.cfg.max_open_to_low_drawdown) {
            return finding;
        }
        if !(rebound >= self.cfg.min_low_to_close_rebound) {
            return finding;
        }

        let close_series = closes(bars);
        let tolerance = self.cfg.near_ma_tolerance;
        let mut near_period = None;
        for &period in &self.cfg.ma_periods {
            let ma = sma(&close_series, period)[n - 1];
            if !ma.is_nan() && (last.close - ma).abs() / ma <= tolerance {
                near_period = Some(period);
                break;
            }
        }
        let Some(period) = near_period else {
            return finding;
        };

        finding.triggered = true;
        finding.detail = format!(
            "close {:+.2}% d/d after an intraday {:.2}% drawdown and {:+.2}% rebound off the low; close within {:.1}% of MA{}",
            dod_change * 100.0,
            drawdown * 100.0,
            rebound * 100.0,
            tolerance * 100.0,
            period,
        );
        finding
    }
}

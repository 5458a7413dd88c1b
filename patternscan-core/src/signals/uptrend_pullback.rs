//! Uptrend pullback bounce — a weekly-resolution pattern: the instrument
//! sits near a long all-time-high window, pulled back to the bottom
//! quarter of its trading range, and has bounced back to the quarter
//! mark on a bullish daily bar. Gated by a market-cap floor and daily
//! price/volume bands.

use chrono::Weekday;

use crate::config::{ConfigError, UptrendBounceConfig};
use crate::domain::Bar;
use crate::weekly::resample_weekly;

use super::{EvalContext, Finding, PatternDetector};

pub const NAME: &str = "uptrend_pullback_bounce";

/// Float slack when comparing the latest weekly high against the rolling
/// maximum it participates in.
pub const NEAR_HIGH_EPSILON: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct UptrendPullbackBounce {
    cfg: UptrendBounceConfig,
    week_ending: Weekday,
}

impl UptrendPullbackBounce {
    pub fn new(cfg: UptrendBounceConfig) -> Result<Self, ConfigError> {
        let week_ending = crate::config::parse_week_ending(&cfg.week_ending)?;
        Ok(Self { cfg, week_ending })
    }
}

/// Position of the closing price inside the high/low range of the
/// trailing `lookback` weeks: 0 at the range low, 1 at the range high.
/// NaN when the range is degenerate.
fn range_position(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    index: usize,
    lookback: usize,
) -> f64 {
    let start = index + 1 - lookback;
    let hi = highs[start..=index].iter().copied().fold(f64::NAN, f64::max);
    let lo = lows[start..=index].iter().copied().fold(f64::NAN, f64::min);
    let range = hi - lo;
    if range == 0.0 {
        return f64::NAN;
    }
    (closes[index] - lo) / range
}

impl PatternDetector for UptrendPullbackBounce {
    fn name(&self) -> &str {
        NAME
    }

    fn min_bars(&self) -> usize {
        1
    }

    fn evaluate(&self, bars: &[Bar], ctx: &EvalContext<'_>) -> Finding {
        let mut finding = Finding::not_triggered(NAME);
        let Some(last) = bars.last() else {
            return finding;
        };

        // Market-cap gate: no collaborator, no answer, or a value below
        // the floor all fail the filter quietly.
        let Some(provider) = ctx.market_caps else {
            return finding;
        };
        let Some(market_cap) = provider.market_cap_krw(ctx.symbol) else {
            return finding;
        };
        if market_cap < self.cfg.min_market_cap_krw {
            return finding;
        }

        // Daily filters on the latest bar.
        if !(last.close >= self.cfg.min_close && last.close <= self.cfg.max_close) {
            return finding;
        }
        if !(last.volume >= self.cfg.min_daily_volume && last.volume <= self.cfg.max_daily_volume)
        {
            return finding;
        }
        if !last.is_bullish() {
            return finding;
        }

        let weeks = resample_weekly(bars, self.week_ending);
        let wn = weeks.len();
        let lookback = self.cfg.weekly_lookback;
        let nhigh = self.cfg.nhigh_weeks;
        if wn < lookback.max(nhigh) + 5 {
            return finding;
        }

        let highs: Vec<f64> = weeks.iter().map(|w| w.high).collect();
        let lows: Vec<f64> = weeks.iter().map(|w| w.low).collect();
        let closes: Vec<f64> = weeks.iter().map(|w| w.close).collect();

        // Near the long-window high: the latest weekly high must be the
        // maximum of the trailing `nhigh` weeks, within float slack.
        let nhigh_max = highs[wn - nhigh..].iter().copied().fold(f64::NAN, f64::max);
        if !(highs[wn - 1] >= nhigh_max - NEAR_HIGH_EPSILON) {
            return finding;
        }

        let pos_now = range_position(&highs, &lows, &closes, wn - 1, lookback);
        let pos_prev = range_position(&highs, &lows, &closes, wn - 2, lookback);

        let was_low = pos_now <= 0.25 || pos_prev <= 0.25;
        let bounced = pos_now >= 0.25;

        if was_low && bounced {
            finding.triggered = true;
            finding.detail = format!(
                "{}-week high held; weekly range position {:.2} (previous {:.2}) back at the quarter mark on a bullish bar; market cap {:.0} KRW",
                nhigh, pos_now, pos_prev, market_cap,
            );
        }
        finding
    }
}

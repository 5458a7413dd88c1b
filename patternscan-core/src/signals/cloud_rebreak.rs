//! Cloud pullback-rebreak — a second breakout above the Ichimoku cloud
//! after a retrace, confirmed by the prior swing resistance, the wide
//! Bollinger upper band, and a volume expansion over the retrace segment.

use crate::config::{CloudRebreakConfig, ResistanceMode, RetraceMode};
use crate::domain::Bar;
use crate::indicators::{bbands, closes, ichimoku, IchimokuParams};

use super::{EvalContext, Finding, PatternDetector};

pub const NAME: &str = "cloud_pullback_rebreak";

#[derive(Debug, Clone)]
pub struct CloudPullbackRebreak {
    cfg: CloudRebreakConfig,
}

impl CloudPullbackRebreak {
    pub fn new(cfg: CloudRebreakConfig) -> Self {
        Self { cfg }
    }

    fn ichimoku_params(&self) -> IchimokuParams {
        IchimokuParams {
            tenkan: self.cfg.tenkan,
            kijun: self.cfg.kijun,
            senkou_b: self.cfg.senkou_b,
            displacement: self.cfg.displacement,
        }
    }
}

impl PatternDetector for CloudPullbackRebreak {
    fn name(&self) -> &str {
        NAME
    }

    fn min_bars(&self) -> usize {
        self.cfg.senkou_b.max(self.cfg.kijun) + 80
    }

    fn evaluate(&self, bars: &[Bar], _ctx: &EvalContext<'_>) -> Finding {
        let mut finding = Finding::not_triggered(NAME);
        let n = bars.len();
        if n < self.min_bars() {
            return finding;
        }

        let frame = ichimoku(bars, &self.ichimoku_params());

        // Cloud bounds from the undisplaced spans; NaN where either span
        // is still warming up.
        let mut cloud_top = vec![f64::NAN; n];
        let mut cloud_bot = vec![f64::NAN; n];
        for i in 0..n {
            let a = frame.span_a_now[i];
            let b = frame.span_b_now[i];
            if !a.is_nan() && !b.is_nan() {
                cloud_top[i] = a.max(b);
                cloud_bot[i] = a.min(b);
            }
        }

        // Breakout events: the reference column crosses above the cloud
        // top while the previous close was still at or under it. NaN
        // comparisons are false, so warmup bars never produce events.
        let mut events: Vec<usize> = Vec::new();
        for i in 1..n {
            let now_ref = if self.cfg.require_open_cross {
                bars[i].open
            } else {
                bars[i].close
            };
            if now_ref > cloud_top[i] && bars[i - 1].close <= cloud_top[i - 1] {
                events.push(i);
            }
        }

        // The most recent breakout must be the final bar, and there must
        // be an earlier one to rebreak from.
        let e2 = n - 1;
        if events.len() < 2 || events[events.len() - 1] != e2 {
            return finding;
        }

        // Walk earlier events newest-first for one separated by more than
        // the minimum gap whose in-between segment retraced enough.
        let min_gap = self.cfg.min_gap_bars.max(1);
        let mut chosen: Option<(usize, usize, f64)> = None;
        for &e1 in events[..events.len() - 1].iter().rev() {
            if e2 - e1 <= min_gap {
                continue;
            }
            let mut retrace_count = 0usize;
            let mut retrace_start = None;
            for i in (e1 + 1)..e2 {
                let is_retrace = match self.cfg.retrace {
                    RetraceMode::Into => bars[i].close <= cloud_top[i],
                    RetraceMode::Below => bars[i].close < cloud_bot[i],
                };
                if is_retrace {
                    retrace_count += 1;
                    if retrace_start.is_none() {
                        retrace_start = Some(i);
                    }
                }
            }
            if retrace_count >= self.cfg.min_retrace_bars {
                let Some(start) = retrace_start else { continue };
                let resistance = match self.cfg.resistance_mode {
                    ResistanceMode::BarHigh => bars[e1].high,
                    ResistanceMode::SwingHigh => bars[e1..start]
                        .iter()
                        .map(|b| b.high)
                        .fold(f64::NAN, f64::max),
                };
                chosen = Some((e1, start, resistance));
                break;
            }
        }
        let Some((e1, retrace_start, resistance)) = chosen else {
            return finding;
        };

        let (now_price, prev_price) = if self.cfg.use_open_for_now {
            (bars[n - 1].open, bars[n - 2].open)
        } else {
            (bars[n - 1].close, bars[n - 2].close)
        };

        let res_break = now_price > resistance && prev_price <= resistance;

        let bands = bbands(&closes(bars), self.cfg.bb_window, self.cfg.bb_k);
        let upper_now = bands.upper[n - 1];
        let upper_prev = bands.upper[n - 2];
        // A band that had not formed yet cannot have been broken the bar
        // before, so a NaN prior band counts as "not yet above".
        let prev_under_band = upper_prev.is_nan() || prev_price <= upper_prev;
        let band_break = now_price > upper_now && prev_under_band;

        let now_vol = bars[n - 1].volume as f64;
        let segment = &bars[retrace_start..e2];
        let retrace_avg = if segment.is_empty() {
            0.0
        } else {
            segment.iter().map(|b| b.volume as f64).sum::<f64>() / segment.len() as f64
        };
        let vol_expansion = retrace_avg > 0.0 && now_vol >= self.cfg.retrace_vol_mult * retrace_avg;

        if res_break && band_break && vol_expansion {
            finding.triggered = true;
            finding.detail = format!(
                "{} second cloud breakout after the {} breakout; resistance {:.2} and BB{} upper broken; volume {:.0} >= {:.1}x retrace average {:.0}",
                bars[e2].date,
                bars[e1].date,
                resistance,
                self.cfg.bb_window,
                now_vol,
                self.cfg.retrace_vol_mult,
                retrace_avg,
            );
            finding.extras.insert("resistance".into(), resistance);
        }
        finding
    }
}

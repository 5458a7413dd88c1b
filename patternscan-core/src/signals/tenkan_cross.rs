//! Tenkan golden-cross combo — seven simultaneous conditions on the
//! final bar: a fresh tenkan/kijun cross, the lagging span crossing its
//! own tenkan at the displaced position, rising trend strength, and a
//! stacked short-term moving-average structure.

use crate::config::TenkanCrossConfig;
use crate::domain::Bar;
use crate::indicators::{closes, dmi_dx, ichimoku, sma, IchimokuParams};

use super::{EvalContext, Finding, PatternDetector};

pub const NAME: &str = "tenkan_golden_cross";

#[derive(Debug, Clone)]
pub struct TenkanGoldenCross {
    cfg: TenkanCrossConfig,
}

impl TenkanGoldenCross {
    pub fn new(cfg: TenkanCrossConfig) -> Self {
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

impl PatternDetector for TenkanGoldenCross {
    fn name(&self) -> &str {
        NAME
    }

    fn min_bars(&self) -> usize {
        self.cfg.kijun.max(self.cfg.displacement + 3)
    }

    fn evaluate(&self, bars: &[Bar], _ctx: &EvalContext<'_>) -> Finding {
        let mut finding = Finding::not_triggered(NAME);
        let n = bars.len();
        if n < 2 {
            return finding;
        }

        let frame = ichimoku(bars, &self.ichimoku_params());
        let tenkan = &frame.tenkan;
        let kijun = &frame.kijun;
        if tenkan[n - 1].is_nan() || kijun[n - 1].is_nan() {
            return finding;
        }

        let lookback = self.cfg.lookback_cross_bars;

        // (A) tenkan above kijun with a cross-up on this bar, or on the
        // previous bar when the lookback allows it.
        let above = tenkan[n - 1] > kijun[n - 1];
        let xup_now = above && tenkan[n - 2] <= kijun[n - 2];
        let xup_prev =
            n >= 3 && tenkan[n - 2] > kijun[n - 2] && tenkan[n - 3] <= kijun[n - 3];
        let cond_a = above && (xup_now || (lookback >= 1 && xup_prev));

        // (B) the same cross structure between the lagging span and the
        // tenkan, read at the displaced position. The lagging span there
        // is the latest close shifted back in time.
        let disp = self.cfg.displacement;
        let chikou = &frame.chikou;
        let mut cond_b = false;
        if n >= disp + 3 {
            let i0 = n - disp - 1;
            if !chikou[i0].is_nan() && !tenkan[i0].is_nan() {
                let b_above = chikou[i0] > tenkan[i0];
                let b_xup_now = b_above && chikou[i0 - 1] <= tenkan[i0 - 1];
                let b_xup_prev =
                    chikou[i0 - 1] > tenkan[i0 - 1] && chikou[i0 - 2] <= tenkan[i0 - 2];
                cond_b = b_above && (b_xup_now || (lookback >= 1 && b_xup_prev));
            }
        }

        // (C) trend strength strictly rising.
        let di = dmi_dx(bars, self.cfg.dx_period);
        let cond_c = di.dx[n - 1] > di.dx[n - 2];

        // (D)/(E) close above the fast MA, fast MA above the mid MA.
        let close_series = closes(bars);
        let ma_fast = sma(&close_series, self.cfg.ma_fast);
        let ma_mid = sma(&close_series, self.cfg.ma_mid);
        let last_close = bars[n - 1].close;
        let cond_d = last_close > ma_fast[n - 1];
        let cond_e = ma_fast[n - 1] > ma_mid[n - 1];

        // (F)/(G) kijun rising and price above it.
        let cond_f = kijun[n - 1] > kijun[n - 2];
        let cond_g = last_close > kijun[n - 1];

        if cond_a && cond_b && cond_c && cond_d && cond_e && cond_f && cond_g {
            finding.triggered = true;
            finding.detail = format!(
                "tenkan/kijun golden cross within {} bar(s), lagging span above tenkan with its own cross, DX rising, close > MA{} > MA{}, kijun rising and close above it",
                lookback + 1,
                self.cfg.ma_fast,
                self.cfg.ma_mid,
            );
        }
        finding
    }
}

//! Ichimoku Cloud — rolling high/low midpoints with displaced spans.
//!
//! Five lines plus the two undisplaced span series:
//! - tenkan: midpoint of the high/low extremes over the short window
//! - kijun: midpoint over the medium window
//! - span_a_now / span_b_now: cloud lines where they are *computed*
//! - span_a_fwd / span_b_fwd: the same lines plotted `displacement` bars
//!   ahead, i.e. `span_a_fwd[t] = span_a_now[t - displacement]`
//! - chikou: the close plotted `displacement` bars behind, i.e.
//!   `chikou[t] = close[t + displacement]`
//!
//! The shift directions are load-bearing: detectors index chikou at
//! `len - displacement - 1` expecting the final close, and compare price
//! against the forward-displaced cloud of `displacement` bars ago.

use crate::domain::Bar;

/// Window and displacement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
            displacement: 26,
        }
    }
}

/// All Ichimoku series, aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct IchimokuFrame {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub span_a_now: Vec<f64>,
    pub span_b_now: Vec<f64>,
    pub span_a_fwd: Vec<f64>,
    pub span_b_fwd: Vec<f64>,
    pub chikou: Vec<f64>,
}

/// Midpoint of the high/low extremes over a trailing window.
///
/// NaN until the window fills, and NaN wherever a window member is void.
fn rolling_midpoint(bars: &[Bar], window: usize) -> Vec<f64> {
    assert!(window >= 1, "midpoint window must be >= 1");
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &bars[(i + 1 - window)..=i];
        let mut max_high = f64::NEG_INFINITY;
        let mut min_low = f64::INFINITY;
        let mut has_nan = false;
        for bar in slice {
            if bar.high.is_nan() || bar.low.is_nan() {
                has_nan = true;
                break;
            }
            max_high = max_high.max(bar.high);
            min_low = min_low.min(bar.low);
        }
        if !has_nan {
            result[i] = (max_high + min_low) / 2.0;
        }
    }

    result
}

/// Compute the full Ichimoku frame for a bar series.
pub fn ichimoku(bars: &[Bar], params: &IchimokuParams) -> IchimokuFrame {
    let n = bars.len();
    let disp = params.displacement;

    let tenkan = rolling_midpoint(bars, params.tenkan);
    let kijun = rolling_midpoint(bars, params.kijun);

    let mut span_a_now = vec![f64::NAN; n];
    for i in 0..n {
        let t = tenkan[i];
        let k = kijun[i];
        if !t.is_nan() && !k.is_nan() {
            span_a_now[i] = (t + k) / 2.0;
        }
    }
    let span_b_now = rolling_midpoint(bars, params.senkou_b);

    // Forward displacement: the cloud at t was computed `disp` bars earlier.
    let mut span_a_fwd = vec![f64::NAN; n];
    let mut span_b_fwd = vec![f64::NAN; n];
    for i in disp..n {
        span_a_fwd[i] = span_a_now[i - disp];
        span_b_fwd[i] = span_b_now[i - disp];
    }

    // Backward displacement: the lagging span at t is the close `disp`
    // bars later in calendar time.
    let mut chikou = vec![f64::NAN; n];
    for i in 0..n.saturating_sub(disp) {
        chikou[i] = bars[i + disp].close;
    }

    IchimokuFrame {
        tenkan,
        kijun,
        span_a_now,
        span_b_now,
        span_a_fwd,
        span_b_fwd,
        chikou,
    }
}

//! Directional Movement Index (Wilder).
//!
//! Steps:
//! 1. +DM / -DM from consecutive bar extremes
//! 2. Smooth +DM, -DM, and TR with the RMA recursion (alpha = 1/period)
//! 3. +DI = 100 * rma(+DM) / rma(TR), -DI analogous
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI)
//!
//! A zero smoothed TR or a zero DI sum yields NaN, never an error;
//! downstream comparisons against NaN are false.

use crate::domain::Bar;

use super::smoothed;

/// The DI and DX series, aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct DirectionalIndex {
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub dx: Vec<f64>,
}

/// Compute the True Range series from bars.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    let h = bars[0].high;
    let l = bars[0].low;
    if h.is_nan() || l.is_nan() {
        tr[0] = f64::NAN;
    } else {
        tr[0] = h - l;
    }

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

/// Compute +DI, -DI, and DX over `period`.
pub fn dmi_dx(bars: &[Bar], period: usize) -> DirectionalIndex {
    let n = bars.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    // Index 0 has no predecessor; both movements stay at the zero branch,
    // as do NaN diffs (a NaN comparison never selects the movement).
    for i in 1..n {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;

        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
    }

    let tr_s = smoothed(&true_range(bars), period);
    let plus_s = smoothed(&plus_dm, period);
    let minus_s = smoothed(&minus_dm, period);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];

    for i in 0..n {
        if tr_s[i].is_nan() || tr_s[i] == 0.0 {
            continue;
        }
        if !plus_s[i].is_nan() {
            plus_di[i] = 100.0 * plus_s[i] / tr_s[i];
        }
        if !minus_s[i].is_nan() {
            minus_di[i] = 100.0 * minus_s[i] / tr_s[i];
        }

        let di_sum = plus_di[i] + minus_di[i];
        if di_sum.is_nan() || di_sum == 0.0 {
            continue;
        }
        dx[i] = 100.0 * (plus_di[i] - minus_di[i]).abs() / di_sum;
    }

    DirectionalIndex {
        plus_di,
        minus_di,
        dx,
    }
}

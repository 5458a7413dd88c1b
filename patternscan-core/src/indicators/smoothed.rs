//! Wilder-style smoothed moving average (RMA).
//!
//! Recursive exponential smoothing with alpha = 1/period, seeded by the
//! first raw value. Unlike a windowed mean there is no warmup gap: the
//! output is defined from the first finite input onward.

/// Apply Wilder smoothing to a series. Alpha = 1/period.
///
/// `out[i] = out[i-1] + alpha * (v[i] - out[i-1])`, seeded with the first
/// non-NaN input. Leading NaNs stay NaN; an interior NaN carries the
/// previous smoothed value forward without updating the state.
pub fn smoothed(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "smoothing period must be >= 1");
    let alpha = 1.0 / period as f64;
    let mut result = vec![f64::NAN; values.len()];
    let mut state: Option<f64> = None;

    for (i, &v) in values.iter().enumerate() {
        match state {
            None => {
                if !v.is_nan() {
                    result[i] = v;
                    state = Some(v);
                }
            }
            Some(prev) => {
                if v.is_nan() {
                    result[i] = prev;
                } else {
                    let s = prev + alpha * (v - prev);
                    result[i] = s;
                    state = Some(s);
                }
            }
        }
    }

    result
}

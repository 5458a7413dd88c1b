//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window. First valid value at index
//! window - 1; a NaN anywhere in the window yields NaN at that index.

/// Compute the simple moving average of `values` over `window`.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "SMA window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window {
        return result;
    }

    // Compute initial window sum
    let mut sum = 0.0;
    let mut nan_in_window = false;
    for &v in &values[..window] {
        if v.is_nan() {
            nan_in_window = true;
        }
        sum += v;
    }

    if !nan_in_window {
        result[window - 1] = sum / window as f64;
    }

    // Roll the window forward
    for i in window..n {
        let leaving = values[i - window];
        let entering = values[i];
        sum = sum - leaving + entering;

        // A NaN entering or leaving the window poisons the running sum;
        // rescan the window to recover an exact value.
        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            nan_in_window = false;
            sum = 0.0;
            for &v in &values[(i + 1 - window)..=i] {
                if v.is_nan() {
                    nan_in_window = true;
                }
                sum += v;
            }
            if nan_in_window {
                continue;
            }
        }

        result[i] = sum / window as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let result = sma(&values, 5);

        assert_eq!(result.len(), 7);
        for i in 0..4 {
            assert!(result[i].is_nan(), "expected NaN at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        // SMA[5] = mean(11,12,13,14,15) = 13.0
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        // SMA[6] = mean(12,13,14,15,16) = 14.0
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let values = [100.0, 200.0, 300.0];
        let result = sma(&values, 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_nan_propagation() {
        let mut values = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        values[2] = f64::NAN;
        let result = sma(&values, 3);
        // Index 2 window [10,11,NaN] -> NaN
        assert!(result[2].is_nan());
        // Index 3 window [11,NaN,13] -> NaN
        assert!(result[3].is_nan());
        // Index 4 window [NaN,13,14] -> NaN
        assert!(result[4].is_nan());
        // Index 5 window [13,14,15] -> 14.0
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_too_few_values() {
        let result = sma(&[10.0, 11.0], 5);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}

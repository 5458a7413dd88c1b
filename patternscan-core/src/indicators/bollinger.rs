//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Middle: SMA(values, window). Upper/lower: middle +/- k * stddev over
//! the same trailing window. Uses population stddev (divide by N).
//! Lookback: window - 1.

/// The three Bollinger band series, aligned 1:1 with the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub lower: Vec<f64>,
    pub mid: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Compute Bollinger Bands over `values` with the given window and multiplier.
pub fn bbands(values: &[f64], window: usize, k: f64) -> BollingerBands {
    assert!(window >= 1, "Bollinger window must be >= 1");
    let n = values.len();
    let mut lower = vec![f64::NAN; n];
    let mut mid = vec![f64::NAN; n];
    let mut upper = vec![f64::NAN; n];

    if n >= window {
        for i in (window - 1)..n {
            let start = i + 1 - window;
            let slice = &values[start..=i];

            // Check for NaN in window
            let mut has_nan = false;
            let mut sum = 0.0;
            for &v in slice {
                if v.is_nan() {
                    has_nan = true;
                    break;
                }
                sum += v;
            }
            if has_nan {
                continue;
            }

            let mean = sum / window as f64;

            // Population stddev
            let variance: f64 = slice
                .iter()
                .map(|&v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / window as f64;
            let stddev = variance.sqrt();

            mid[i] = mean;
            upper[i] = mean + k * stddev;
            lower[i] = mean - k * stddev;
        }
    }

    BollingerBands { lower, mid, upper }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, sma, DEFAULT_EPSILON};

    #[test]
    fn bollinger_mid_is_sma() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let bands = bbands(&values, 3, 2.0);
        let expected = sma(&values, 3);

        assert!(bands.mid[0].is_nan());
        assert!(bands.mid[1].is_nan());
        for i in 2..5 {
            assert_approx(bands.mid[i], expected[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let bands = bbands(&values, 3, 2.0);

        for i in 2..5 {
            let half_width = bands.upper[i] - bands.mid[i];
            assert_approx(bands.mid[i] - bands.lower[i], half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_population_stddev() {
        // Window [10, 12, 14]: mean 12, population variance (4+0+4)/3 = 8/3
        let values = [10.0, 12.0, 14.0];
        let bands = bbands(&values, 3, 2.0);
        let stddev = (8.0_f64 / 3.0).sqrt();
        assert_approx(bands.upper[2], 12.0 + 2.0 * stddev, DEFAULT_EPSILON);
        assert_approx(bands.lower[2], 12.0 - 2.0 * stddev, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let values = [100.0, 100.0, 100.0, 100.0];
        let bands = bbands(&values, 3, 2.0);
        // Constant price -> stddev = 0 -> bands collapse to SMA
        assert_approx(bands.upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_ordering() {
        let values = [10.0, 14.0, 9.0, 13.0, 16.0, 12.0];
        let bands = bbands(&values, 4, 2.0);
        for i in 3..6 {
            assert!(bands.lower[i] <= bands.mid[i]);
            assert!(bands.mid[i] <= bands.upper[i]);
        }
    }

    #[test]
    fn bollinger_nan_propagation() {
        let mut values = vec![10.0, 11.0, 12.0, 13.0];
        values[2] = f64::NAN;
        let bands = bbands(&values, 3, 2.0);
        assert!(bands.upper[2].is_nan());
        assert!(bands.upper[3].is_nan()); // window includes NaN at index 2
    }
}

//! Indicator primitives and composite indicators.
//!
//! All functions are pure: a value or bar slice in, a `Vec<f64>` (or a
//! struct of parallel `Vec<f64>`) of the same length out. Warmup positions
//! hold `f64::NAN`; any comparison against NaN is false, so downstream
//! detector conditions silently fail instead of raising.

pub mod bollinger;
pub mod dmi;
pub mod ichimoku;
pub mod sma;
pub mod smoothed;

pub use bollinger::{bbands, BollingerBands};
pub use dmi::{dmi_dx, true_range, DirectionalIndex};
pub use ichimoku::{ichimoku, IchimokuFrame, IchimokuParams};
pub use sma::sma;
pub use smoothed::smoothed;

use crate::domain::Bar;

/// Extract the close column from a bar slice.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            symbol: "TEST".to_string(),
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

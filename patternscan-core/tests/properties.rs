//! Property tests for indicator and resampler invariants.
//!
//! Uses proptest to verify:
//! 1. SMA equals the exact trailing mean wherever it is defined
//! 2. Bollinger ordering: lower <= mid <= upper
//! 3. DX stays within [0, 100] wherever defined
//! 4. Displacement identities: span_a_fwd and chikou are exact shifts
//! 5. Wilder smoothing has no warmup gap on finite input
//! 6. Weekly bars preserve total volume and land on the anchor weekday

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use patternscan_core::domain::Bar;
use patternscan_core::indicators::{bbands, dmi_dx, ichimoku, sma, smoothed, IchimokuParams};
use patternscan_core::weekly::resample_weekly;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(50.0..150.0_f64, 5..60)
}

/// Bars built from a close walk plus non-negative high/low spreads, so
/// OHLC sanity holds by construction.
fn arb_bars() -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((50.0..150.0_f64, 0.0..5.0_f64, 0.0..5.0_f64), 5..50).prop_map(
        |rows| {
            let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            let mut prev_close = rows[0].0;
            rows.iter()
                .enumerate()
                .map(|(i, &(close, up, down))| {
                    let open = prev_close;
                    prev_close = close;
                    Bar {
                        symbol: "PROP".into(),
                        date: base_date + Duration::days(i as i64),
                        open,
                        high: open.max(close) + up,
                        low: (open.min(close) - down).max(1.0),
                        close,
                        volume: 1_000 + i as u64,
                    }
                })
                .collect()
        },
    )
}

// ── 1. SMA is the exact trailing mean ────────────────────────────────

proptest! {
    #[test]
    fn sma_matches_naive_mean(values in arb_values(), window in 1_usize..8) {
        let result = sma(&values, window);
        prop_assert_eq!(result.len(), values.len());
        for i in 0..values.len() {
            if i + 1 < window {
                prop_assert!(result[i].is_nan());
            } else {
                let mean: f64 =
                    values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                prop_assert!((result[i] - mean).abs() < 1e-9);
            }
        }
    }
}

// ── 2. Bollinger ordering ────────────────────────────────────────────

proptest! {
    #[test]
    fn bollinger_ordering(values in arb_values(), window in 1_usize..8) {
        let bands = bbands(&values, window, 2.0);
        for i in 0..values.len() {
            if !bands.mid[i].is_nan() {
                prop_assert!(bands.lower[i] <= bands.mid[i] + 1e-9);
                prop_assert!(bands.mid[i] <= bands.upper[i] + 1e-9);
            }
        }
    }
}

// ── 3. DX bounds ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dx_within_bounds(bars in arb_bars(), period in 2_usize..6) {
        let di = dmi_dx(&bars, period);
        for &v in &di.dx {
            if !v.is_nan() {
                prop_assert!((0.0..=100.0 + 1e-9).contains(&v), "dx out of range: {v}");
            }
        }
    }
}

// ── 4. Displacement identities ───────────────────────────────────────

proptest! {
    #[test]
    fn span_and_chikou_are_exact_shifts(
        bars in arb_bars(),
        displacement in 1_usize..5,
    ) {
        let params = IchimokuParams {
            tenkan: 2,
            kijun: 3,
            senkou_b: 4,
            displacement,
        };
        let frame = ichimoku(&bars, &params);
        let n = bars.len();

        for t in 0..n {
            if t >= displacement {
                let shifted = frame.span_a_now[t - displacement];
                if shifted.is_nan() {
                    prop_assert!(frame.span_a_fwd[t].is_nan());
                } else {
                    prop_assert_eq!(frame.span_a_fwd[t], shifted);
                }
                let shifted_b = frame.span_b_now[t - displacement];
                if shifted_b.is_nan() {
                    prop_assert!(frame.span_b_fwd[t].is_nan());
                } else {
                    prop_assert_eq!(frame.span_b_fwd[t], shifted_b);
                }
            } else {
                prop_assert!(frame.span_a_fwd[t].is_nan());
            }

            if t + displacement < n {
                prop_assert_eq!(frame.chikou[t], bars[t + displacement].close);
            } else {
                prop_assert!(frame.chikou[t].is_nan());
            }
        }
    }
}

// ── 5. Wilder smoothing has no warmup gap ────────────────────────────

proptest! {
    #[test]
    fn smoothed_defined_from_first_input(values in arb_values(), period in 1_usize..15) {
        let result = smoothed(&values, period);
        prop_assert_eq!(result[0], values[0]);
        prop_assert!(result.iter().all(|v| !v.is_nan()));
    }
}

// ── 6. Weekly aggregation invariants ─────────────────────────────────

proptest! {
    #[test]
    fn weekly_preserves_volume_and_weekday(bars in arb_bars()) {
        let weeks = resample_weekly(&bars, Weekday::Fri);

        let daily_volume: u64 = bars.iter().map(|b| b.volume).sum();
        let weekly_volume: u64 = weeks.iter().map(|w| w.volume).sum();
        prop_assert_eq!(daily_volume, weekly_volume);

        for w in &weeks {
            prop_assert_eq!(w.week_end.weekday(), Weekday::Fri);
            prop_assert!(w.high >= w.low);
            prop_assert!(w.high >= w.open && w.high >= w.close);
            prop_assert!(w.low <= w.open && w.low <= w.close);
        }

        // Ascending, duplicate-free week ends.
        for pair in weeks.windows(2) {
            prop_assert!(pair[0].week_end < pair[1].week_end);
        }
    }
}

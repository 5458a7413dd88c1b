//! PatternScan Core — indicator library and chart-pattern scan engine.
//!
//! This crate contains the whole evaluation path for one instrument:
//! - Domain types (bars, series invariants, weekly aggregates)
//! - Indicator primitives (SMA, Wilder smoothing, Bollinger, Ichimoku, DMI)
//! - Four composite pattern detectors behind one trait
//! - Config-driven dispatch with per-detector fault isolation
//! - Scan orchestration over a universe, with per-run statistics
//! - Data seams for the price-history and market-cap collaborators
//!
//! Everything is pure and stateless per invocation; the only internal
//! parallelism is the per-instrument fan-out in `scan`.

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod report;
pub mod scan;
pub mod signals;
pub mod universe;
pub mod weekly;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types that cross the scan fan-out are
    /// Send + Sync. If any of them loses the bound, the build breaks
    /// here instead of deep inside a rayon closure.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<weekly::WeeklyBar>();
        require_sync::<weekly::WeeklyBar>();

        require_send::<signals::Finding>();
        require_sync::<signals::Finding>();
        require_send::<scan::ScanStats>();
        require_sync::<scan::ScanStats>();
        require_send::<scan::ScanOutcome>();
        require_sync::<scan::ScanOutcome>();

        require_send::<config::AppConfig>();
        require_sync::<config::AppConfig>();
        require_send::<universe::Universe>();
        require_sync::<universe::Universe>();

        require_send::<signals::CloudPullbackRebreak>();
        require_sync::<signals::CloudPullbackRebreak>();
        require_send::<signals::TenkanGoldenCross>();
        require_sync::<signals::TenkanGoldenCross>();
        require_send::<signals::UptrendPullbackBounce>();
        require_sync::<signals::UptrendPullbackBounce>();
        require_send::<signals::CrashMaRebound>();
        require_sync::<signals::CrashMaRebound>();

        require_send::<data::CsvStore>();
        require_sync::<data::CsvStore>();
        require_send::<data::SyntheticStore>();
        require_sync::<data::SyntheticStore>();
        require_send::<data::StaticMarketCaps>();
        require_sync::<data::StaticMarketCaps>();
    }

    /// Architecture contract: detectors never see portfolio or account
    /// state — `evaluate` receives bars and the evaluation context only.
    #[test]
    fn detector_trait_is_portfolio_agnostic() {
        fn _check_trait_object_builds(
            detector: &dyn signals::PatternDetector,
            bars: &[domain::Bar],
            ctx: &signals::EvalContext<'_>,
        ) -> signals::Finding {
            detector.evaluate(bars, ctx)
        }
    }
}

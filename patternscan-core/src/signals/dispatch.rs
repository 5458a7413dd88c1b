//! Config-driven dispatch — build the enabled detectors and evaluate
//! them against one instrument behind a per-detector fault boundary.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::{ConfigError, SignalsConfig};
use crate::domain::Bar;

use super::{
    CloudPullbackRebreak, CrashMaRebound, EvalContext, Finding, PatternDetector,
    TenkanGoldenCross, UptrendPullbackBounce,
};

/// Findings plus the number of detectors that failed unexpectedly.
#[derive(Debug, Default)]
pub struct DispatchResult {
    pub findings: Vec<Finding>,
    pub errors: u64,
}

/// Instantiate the enabled detectors in declaration order.
///
/// The order is fixed so the result list is reproducible run to run.
pub fn build_detectors(
    cfg: &SignalsConfig,
) -> Result<Vec<Box<dyn PatternDetector>>, ConfigError> {
    let mut detectors: Vec<Box<dyn PatternDetector>> = Vec::new();
    if cfg.cloud_pullback_rebreak.enabled {
        detectors.push(Box::new(CloudPullbackRebreak::new(
            cfg.cloud_pullback_rebreak.clone(),
        )));
    }
    if cfg.tenkan_golden_cross.enabled {
        detectors.push(Box::new(TenkanGoldenCross::new(
            cfg.tenkan_golden_cross.clone(),
        )));
    }
    if cfg.uptrend_pullback_bounce.enabled {
        detectors.push(Box::new(UptrendPullbackBounce::new(
            cfg.uptrend_pullback_bounce.clone(),
        )?));
    }
    if cfg.crash_ma_rebound.enabled {
        detectors.push(Box::new(CrashMaRebound::new(cfg.crash_ma_rebound.clone())));
    }
    Ok(detectors)
}

/// Evaluate every detector against one instrument's bars, collecting the
/// triggered findings in detector order.
///
/// A panicking detector is counted and logged, and must not suppress the
/// other detectors for this instrument (or any other instrument).
pub fn run_detectors(
    bars: &[Bar],
    detectors: &[Box<dyn PatternDetector>],
    ctx: &EvalContext<'_>,
) -> DispatchResult {
    let mut result = DispatchResult::default();
    for detector in detectors {
        match catch_unwind(AssertUnwindSafe(|| detector.evaluate(bars, ctx))) {
            Ok(finding) => {
                if finding.triggered {
                    result.findings.push(finding);
                }
            }
            Err(_) => {
                result.errors += 1;
                tracing::warn!(
                    symbol = ctx.symbol,
                    detector = detector.name(),
                    "detector failed unexpectedly; skipping"
                );
            }
        }
    }
    result
}

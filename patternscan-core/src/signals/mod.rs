//! Pattern detection — composite rule sets over one instrument's history.
//!
//! Detectors are pure and portfolio-agnostic: bar history in, a `Finding`
//! out, evaluated only as of the final bar. Insufficient history or an
//! undefined indicator operand produces a non-triggered finding, never an
//! error. The only collaborator a detector may consult is the market-cap
//! lookup carried by `EvalContext`.

pub mod cloud_rebreak;
pub mod crash_rebound;
pub mod dispatch;
pub mod tenkan_cross;
pub mod uptrend_pullback;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::MarketCapProvider;
use crate::domain::Bar;

pub use cloud_rebreak::CloudPullbackRebreak;
pub use crash_rebound::CrashMaRebound;
pub use dispatch::{build_detectors, run_detectors, DispatchResult};
pub use tenkan_cross::TenkanGoldenCross;
pub use uptrend_pullback::UptrendPullbackBounce;

/// The outcome of one detector for one instrument's latest bar.
///
/// `extras` carries numeric context for downstream collaborators (the
/// chart renderer reads `resistance`); it is ordered so serialized
/// findings are byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub name: String,
    pub triggered: bool,
    pub detail: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, f64>,
}

impl Finding {
    /// A quiet finding for the given detector.
    pub fn not_triggered(name: &str) -> Self {
        Self {
            name: name.to_string(),
            triggered: false,
            detail: String::new(),
            extras: BTreeMap::new(),
        }
    }
}

/// Per-instrument evaluation context handed to each detector.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub symbol: &'a str,
    pub market_caps: Option<&'a dyn MarketCapProvider>,
}

/// Trait for pattern detectors.
///
/// `evaluate` looks only at the latest bar of the series (plus whatever
/// lookback its indicators need) and must not retain state between calls.
pub trait PatternDetector: Send + Sync {
    /// Stable identifier used in findings and per-signal statistics.
    fn name(&self) -> &str;

    /// Nominal number of bars needed for a meaningful evaluation.
    ///
    /// Informational only — `evaluate` must degrade to a non-triggered
    /// finding on shorter input, not rely on callers gating it.
    fn min_bars(&self) -> usize;

    /// Evaluate the detector as of the final bar.
    fn evaluate(&self, bars: &[Bar], ctx: &EvalContext<'_>) -> Finding;
}

//! Synthetic bar source — seeded random walk for smoke runs and benches.
//!
//! Deterministic: the per-symbol stream is derived from the store seed and
//! the symbol name, so the same inputs always produce the same series.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Bar;

use super::{DataError, PriceProvider};

/// Deterministic random-walk bar source.
#[derive(Debug, Clone)]
pub struct SyntheticStore {
    pub bars_per_symbol: usize,
    pub seed: u64,
}

impl SyntheticStore {
    pub fn new(bars_per_symbol: usize, seed: u64) -> Self {
        Self {
            bars_per_symbol,
            seed,
        }
    }
}

fn symbol_seed(base: u64, symbol: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    symbol.hash(&mut hasher);
    hasher.finish()
}

impl PriceProvider for SyntheticStore {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let mut rng = StdRng::seed_from_u64(symbol_seed(self.seed, symbol));
        let start = NaiveDate::from_ymd_opt(2018, 1, 2).expect("valid start date");

        let mut bars = Vec::with_capacity(self.bars_per_symbol);
        let mut close = 10_000.0;
        for i in 0..self.bars_per_symbol {
            let open = close;
            let drift: f64 = rng.gen_range(-0.03..0.03);
            close = (open * (1.0 + drift)).max(100.0);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(50_000..5_000_000);
            bars.push(Bar {
                symbol: symbol.to_string(),
                date: start + Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            });
        }
        Ok(bars)
    }
}

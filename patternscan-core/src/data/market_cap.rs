//! Market-cap lookup — the single external collaborator of the
//! uptrend-bounce detector.
//!
//! A miss is a failed filter, never an error: implementations return
//! `None` for anything they cannot answer, and the core does not retry.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::DataError;

/// Lookup from instrument to market capitalization in KRW.
pub trait MarketCapProvider: Send + Sync {
    fn market_cap_krw(&self, symbol: &str) -> Option<f64>;
}

/// In-memory market-cap table, optionally loaded from CSV
/// (`symbol,market_cap_krw` header).
#[derive(Debug, Clone, Default)]
pub struct StaticMarketCaps {
    caps: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct CapRow {
    symbol: String,
    market_cap_krw: f64,
}

impl StaticMarketCaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, cap: f64) {
        self.caps.insert(symbol.into(), cap);
    }

    pub fn from_csv_file(path: &Path) -> Result<Self, DataError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| DataError::Parse(format!("{}: {e}", path.display())))?;
        let mut caps = HashMap::new();
        for record in reader.deserialize::<CapRow>() {
            let row = record.map_err(|e| DataError::Parse(format!("{}: {e}", path.display())))?;
            caps.insert(row.symbol, row.market_cap_krw);
        }
        Ok(Self { caps })
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}

impl MarketCapProvider for StaticMarketCaps {
    fn market_cap_krw(&self, symbol: &str) -> Option<f64> {
        if let Some(&cap) = self.caps.get(symbol) {
            return Some(cap);
        }
        // Fall back through the bare code before the exchange suffix
        // ("005930.KS" -> "005930").
        symbol
            .split('.')
            .next()
            .and_then(|code| self.caps.get(code).copied())
    }
}

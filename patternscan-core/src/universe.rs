//! Universe configuration — market-organized ticker lists.
//!
//! Stored as a TOML file with a `[markets]` table (market name to ticker
//! list) and an optional `[names]` table (ticker to display name).
//! Market membership drives include/exclude filtering; sharding splits
//! the resulting list round-robin across parallel processes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// The complete universe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Universe {
    pub markets: BTreeMap<String, Vec<String>>,
    pub names: BTreeMap<String, String>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Tickers of the selected markets, in deterministic order.
    ///
    /// An empty include list selects every market; excludes always win.
    pub fn tickers(&self, include_markets: &[String], exclude_markets: &[String]) -> Vec<String> {
        self.markets
            .iter()
            .filter(|(market, _)| {
                (include_markets.is_empty() || include_markets.contains(market))
                    && !exclude_markets.contains(market)
            })
            .flat_map(|(_, tickers)| tickers.iter().cloned())
            .collect()
    }

    /// All tickers across all markets.
    pub fn all_tickers(&self) -> Vec<String> {
        self.tickers(&[], &[])
    }

    /// Total number of tickers.
    pub fn ticker_count(&self) -> usize {
        self.markets.values().map(|v| v.len()).sum()
    }

    /// Display name for a ticker, falling back through the bare code
    /// before the exchange suffix, then the ticker itself.
    pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
        if let Some(name) = self.names.get(ticker) {
            return name;
        }
        let code = ticker.split('.').next().unwrap_or(ticker);
        if let Some(name) = self.names.get(code) {
            return name;
        }
        ticker
    }

    /// Round-robin shard of a ticker list: element `i` belongs to shard
    /// `i % total_shards`.
    pub fn shard(tickers: &[String], shard_index: usize, total_shards: usize) -> Vec<String> {
        if total_shards <= 1 {
            return tickers.to_vec();
        }
        tickers
            .iter()
            .enumerate()
            .filter(|(i, _)| i % total_shards == shard_index)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Universe {
        Universe::from_toml(
            r#"
            [markets]
            KOSPI = ["005930.KS", "000660.KS", "035420.KS"]
            KOSDAQ = ["247540.KQ", "086520.KQ"]
            KONEX = ["278990.KN"]

            [names]
            "005930" = "Samsung Electronics"
            "247540.KQ" = "Ecopro BM"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn tickers_with_filters() {
        let u = sample();
        let kospi_only = u.tickers(&["KOSPI".to_string()], &[]);
        assert_eq!(kospi_only.len(), 3);
        assert!(kospi_only.contains(&"005930.KS".to_string()));

        let no_konex = u.tickers(&[], &["KONEX".to_string()]);
        assert_eq!(no_konex.len(), 5);
        assert!(!no_konex.contains(&"278990.KN".to_string()));
    }

    #[test]
    fn all_tickers_flattens() {
        let u = sample();
        assert_eq!(u.all_tickers().len(), 6);
        assert_eq!(u.ticker_count(), 6);
    }

    #[test]
    fn display_name_fallbacks() {
        let u = sample();
        // Bare-code fallback before the exchange suffix.
        assert_eq!(u.display_name("005930.KS"), "Samsung Electronics");
        // Exact match.
        assert_eq!(u.display_name("247540.KQ"), "Ecopro BM");
        // No entry: the ticker itself.
        assert_eq!(u.display_name("000660.KS"), "000660.KS");
    }

    #[test]
    fn shard_partitions_the_list() {
        let tickers: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
        let a = Universe::shard(&tickers, 0, 3);
        let b = Universe::shard(&tickers, 1, 3);
        let c = Universe::shard(&tickers, 2, 3);

        let mut merged: Vec<String> = a.iter().chain(&b).chain(&c).cloned().collect();
        merged.sort();
        let mut expected = tickers.clone();
        expected.sort();
        assert_eq!(merged, expected);
        assert_eq!(a, vec!["T0", "T3", "T6", "T9"]);
    }

    #[test]
    fn single_shard_is_identity() {
        let tickers: Vec<String> = (0..4).map(|i| format!("T{i}")).collect();
        assert_eq!(Universe::shard(&tickers, 0, 1), tickers);
    }

    #[test]
    fn toml_roundtrip() {
        let u = sample();
        let text = u.to_toml().unwrap();
        let parsed = Universe::from_toml(&text).unwrap();
        assert_eq!(u.ticker_count(), parsed.ticker_count());
        assert_eq!(parsed.display_name("005930.KS"), "Samsung Electronics");
    }
}

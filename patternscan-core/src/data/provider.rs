//! Price provider trait and structured error types.

use thiserror::Error;

use crate::domain::{Bar, SeriesError};

/// Structured error types for bar retrieval.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("read bars: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse bars: {0}")]
    Parse(String),

    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// Trait for daily bar sources.
///
/// Implementations return the full available history for one symbol in
/// ascending date order. Retry and backoff, where they make sense at all,
/// belong to the implementation, never to callers of this trait.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol.
    fn fetch(&self, symbol: &str) -> Result<Vec<Bar>, DataError>;
}

//! CSV directory store — one `SYMBOL.csv` file per instrument.
//!
//! Expected header: `date,open,high,low,close,volume` with ISO dates.
//! The series invariant (strictly ascending, duplicate-free dates) is
//! enforced on load.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{series, Bar};

use super::{DataError, PriceProvider};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Bar store backed by a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PriceProvider for CsvStore {
    fn name(&self) -> &str {
        "csv_store"
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let path = self.dir.join(format!("{symbol}.csv"));
        if !path.is_file() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| DataError::Parse(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for record in reader.deserialize::<CsvRow>() {
            let row = record.map_err(|e| DataError::Parse(format!("{}: {e}", path.display())))?;
            bars.push(Bar {
                symbol: symbol.to_string(),
                date: row.date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        series::validate(&bars)?;
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("patternscan-csv-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{name}.csv")), content).unwrap();
        dir
    }

    #[test]
    fn reads_bars_in_order() {
        let dir = write_fixture(
            "GOOD",
            "date,open,high,low,close,volume\n\
             2024-01-02,100.0,104.0,98.0,103.0,1000\n\
             2024-01-03,103.0,110.0,102.0,108.0,2000\n",
        );
        let store = CsvStore::new(&dir);
        let bars = store.fetch("GOOD").unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].symbol, "GOOD");
        assert_eq!(bars[0].close, 103.0);
        assert_eq!(bars[1].volume, 2000);
        assert_eq!(
            bars[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn missing_symbol() {
        let store = CsvStore::new(std::env::temp_dir());
        let err = store.fetch("NO_SUCH_SYMBOL").unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let dir = write_fixture(
            "BAD",
            "date,open,high,low,close,volume\n\
             2024-01-03,100.0,104.0,98.0,103.0,1000\n\
             2024-01-02,103.0,110.0,102.0,108.0,2000\n",
        );
        let store = CsvStore::new(&dir);
        let err = store.fetch("BAD").unwrap_err();
        assert!(matches!(err, DataError::Series(_)));
    }

    #[test]
    fn rejects_malformed_rows() {
        let dir = write_fixture(
            "MALFORMED",
            "date,open,high,low,close,volume\n\
             2024-01-02,abc,104.0,98.0,103.0,1000\n",
        );
        let store = CsvStore::new(&dir);
        let err = store.fetch("MALFORMED").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }
}

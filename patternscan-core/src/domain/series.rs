//! Series invariant — strictly ascending, duplicate-free dates.
//!
//! Every indicator indexes positionally into the bar ordering, so the
//! ordering invariant is enforced once at the ingestion boundary and
//! assumed everywhere else. "Last bar" always means the maximum date.

use chrono::NaiveDate;
use thiserror::Error;

use super::Bar;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bar dates must be strictly ascending: {prev} is not before {next}")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },
}

/// Validate the strictly-ascending, duplicate-free date invariant.
///
/// Gaps (missing calendar days) are fine; equal or descending dates are not.
pub fn validate(bars: &[Bar]) -> Result<(), SeriesError> {
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(SeriesError::OutOfOrder {
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    Ok(())
}

//! Weekly resampler — calendar-week aggregation of daily bars.
//!
//! Each daily bar maps to the next date (inclusive) whose weekday equals
//! the configured week-end anchor; consecutive bars sharing that date form
//! one weekly bar. Aggregation: open = first daily open, high = max,
//! low = min, close = last daily close, volume = sum. Weeks containing a
//! void constituent are dropped, and calendar weeks with no bars produce
//! no output row.
//!
//! Precondition: bars are in ascending date order (the series invariant),
//! so week groups are contiguous and the output is ascending by week end.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::Bar;

/// One calendar week of aggregated daily bars.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyBar {
    pub week_end: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl WeeklyBar {
    fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }
}

/// The week-end date for a daily bar date: the next `week_ending` weekday,
/// counting the date itself.
pub fn week_end_for(date: NaiveDate, week_ending: Weekday) -> NaiveDate {
    let days_ahead = (week_ending.num_days_from_monday() + 7
        - date.weekday().num_days_from_monday())
        % 7;
    date + Duration::days(i64::from(days_ahead))
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Aggregate daily bars into calendar-week bars ending on `week_ending`.
pub fn resample_weekly(bars: &[Bar], week_ending: Weekday) -> Vec<WeeklyBar> {
    let mut weeks: Vec<WeeklyBar> = Vec::new();

    for bar in bars {
        let week_end = week_end_for(bar.date, week_ending);
        if let Some(week) = weeks.last_mut() {
            if week.week_end == week_end {
                week.high = nan_max(week.high, bar.high);
                week.low = nan_min(week.low, bar.low);
                week.close = bar.close;
                week.volume += bar.volume;
                // A void constituent voids the whole week.
                if bar.is_void() {
                    week.open = f64::NAN;
                }
                continue;
            }
        }
        let mut week = WeeklyBar {
            week_end,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        };
        if bar.is_void() {
            week.open = f64::NAN;
        }
        weeks.push(week);
    }

    weeks.retain(|w| !w.is_void());
    weeks
}

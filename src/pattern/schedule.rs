//! Maps a pattern onto calendar dates
//!
//! The calendar renders weeks as columns, so the pattern is scanned
//! column-major: cell (row, col) lands `col * rows + row` days after the
//! start date. Offsets past the one-year window are dropped.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::consts::CALENDAR_WINDOW_DAYS;
use crate::pattern::Pattern;

/// Commit dates for `pattern` starting at `start`: deduplicated, sorted
/// ascending, all within the calendar window.
pub(crate) fn commit_dates(pattern: &Pattern, start: NaiveDate) -> Vec<NaiveDate> {
    let rows = pattern.rows();
    let mut dates = BTreeSet::new();

    for row in 0..rows {
        for col in 0..pattern.cols() {
            if !pattern.is_on(row, col) {
                continue;
            }
            let day_offset = (col * rows + row) as i64;
            if day_offset < CALENDAR_WINDOW_DAYS {
                dates.insert(start + Duration::days(day_offset));
            }
        }
    }

    dates.into_iter().collect()
}

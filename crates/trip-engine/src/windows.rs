//! Sliding-window enumeration over a plan's date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{self, add_days};

/// A candidate trip slot: `num_days` consecutive days, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// The window of `num_days` days starting at `start`.
    ///
    /// `None` when the last day would fall past the end of the calendar.
    pub fn starting_at(start: NaiveDate, num_days: u32) -> Option<Self> {
        let end = add_days(start, i64::from(num_days) - 1)?;
        Some(Self { start, end })
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        dates::expand_interval(self.start, self.end)
    }

    pub fn len_days(&self) -> i64 {
        dates::range_days(self.start, self.end)
    }

    /// `Jun 2-4` style label.
    pub fn label(&self) -> String {
        dates::format_date_range(self.start, self.end)
    }
}

/// Enumerate every `num_days` window inside `[start_range, end_range]`.
///
/// Windows are ordered by ascending start. The first starts at `start_range`,
/// the last ends at `end_range`, and there are `range_days - num_days + 1` of
/// them. A trip longer than the range (or a zero-length trip) yields none.
pub fn generate_windows(start_range: NaiveDate, end_range: NaiveDate, num_days: u32) -> Vec<Window> {
    let range_days = dates::range_days(start_range, end_range);
    let num_days_i = i64::from(num_days);
    if num_days == 0 || range_days < num_days_i {
        return Vec::new();
    }

    let count = (range_days - num_days_i + 1) as usize;
    start_range
        .iter_days()
        .take(count)
        .filter_map(|start| Window::starting_at(start, num_days))
        .collect()
}

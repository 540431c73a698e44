//! Calendar-date helpers.
//!
//! Dates are naive calendar days (`YYYY-MM-DD`) with no time or timezone
//! component. All arithmetic is whole-day arithmetic on [`NaiveDate`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// An inclusive run of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, counting both ends. Zero for an inverted range.
    pub fn len_days(&self) -> i64 {
        range_days(self.start, self.end).max(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        expand_interval(self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` string.
///
/// # Errors
/// Returns `EngineError::InvalidDate` if the string is not exactly
/// `YYYY-MM-DD` (four-digit year, no sign) or not a valid calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if !has_iso_shape(trimmed) {
        return Err(EngineError::InvalidDate(format!("'{}': expected YYYY-MM-DD", s)));
    }
    NaiveDate::parse_from_str(trimmed, ISO_FORMAT)
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

fn has_iso_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Move a date by `days` (negative moves earlier).
///
/// `None` when the result falls outside chrono's representable range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// Signed whole days from `earlier` to `later`.
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Number of days in the inclusive range `[start, end]`.
///
/// Zero or negative when `end` precedes `start`.
pub fn range_days(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(end, start) + 1
}

/// Every date from `start` to `end` inclusive, ascending. Empty when `start > end`.
pub fn expand_interval(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Group dates into maximal runs of consecutive days.
///
/// Input order and duplicates do not matter; the output is sorted by start.
pub fn group_consecutive(dates: &[NaiveDate]) -> Vec<DateRange> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<DateRange> = Vec::new();
    for date in sorted {
        if let Some(last) = runs.last_mut() {
            if days_between(date, last.end) == 1 {
                last.end = date;
                continue;
            }
        }
        runs.push(DateRange::new(date, date));
    }
    runs
}

/// Human-readable label for an inclusive date range.
///
/// - same day: `Jun 2`
/// - same month: `Jun 2-4`
/// - same year: `Jun 30 - Jul 2`
/// - across years: `Dec 30, 2025 - Jan 2, 2026`
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        return start.format("%b %-d").to_string();
    }
    if start.year() != end.year() {
        return format!(
            "{} - {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        );
    }
    if start.month() == end.month() {
        return format!("{}-{}", start.format("%b %-d"), end.day());
    }
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
}

/// Comma-separated labels for a set of dates, grouped into consecutive runs.
pub fn describe_dates(dates: &[NaiveDate]) -> String {
    group_consecutive(dates)
        .iter()
        .map(|r| format_date_range(r.start, r.end))
        .collect::<Vec<_>>()
        .join(", ")
}

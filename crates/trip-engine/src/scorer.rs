//! Per-window availability scoring and blocker analysis.
//!
//! A respondent is *available* for a window only if they marked every date in
//! it. Everyone else is a *blocker*, and for each blocker we record which dates
//! they are missing and whether they are free on the day just outside either
//! end of the window, which is what the "shift your dates" heuristic needs.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dates::{self, add_days};
use crate::model::Response;
use crate::windows::{generate_windows, Window};

/// Which way a window could move to pick up a blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Earlier,
    Later,
}

impl ShiftDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftDirection::Earlier => "earlier",
            ShiftDirection::Later => "later",
        }
    }
}

impl std::fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one respondent cannot make one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockerInfo {
    pub respondent_id: String,
    pub name: String,
    /// Window dates the respondent did not mark, ascending.
    pub missing_dates: Vec<NaiveDate>,
    pub missing_count: usize,
    /// Free on the day before the window, and that day is inside the plan range.
    pub has_adjacent_before: bool,
    /// Free on the day after the window, and that day is inside the plan range.
    pub has_adjacent_after: bool,
    pub shift_direction: Option<ShiftDirection>,
    /// Days to move the window; zero when no shift is suggested.
    pub shift_days: u32,
}

/// A window with its availability tally and blockers.
///
/// Invariant: `available_count + blockers.len() == total_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub available_count: usize,
    pub total_count: usize,
    /// `round(available_count / total_count * 100)`.
    pub percentage: u32,
    pub blockers: Vec<BlockerInfo>,
}

impl ScoredWindow {
    pub fn window(&self) -> Window {
        Window {
            start: self.start,
            end: self.end,
        }
    }

    pub fn label(&self) -> String {
        dates::format_date_range(self.start, self.end)
    }

    pub fn is_perfect(&self) -> bool {
        self.percentage == 100
    }

    pub fn blocker_ids(&self) -> BTreeSet<&str> {
        self.blockers
            .iter()
            .map(|b| b.respondent_id.as_str())
            .collect()
    }

    pub fn is_blocked_by(&self, respondent_id: &str) -> bool {
        self.blockers.iter().any(|b| b.respondent_id == respondent_id)
    }
}

/// Rounded share of `available` in `total`, as a whole percentage.
///
/// Zero when `total` is zero.
pub fn percentage_of(available: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((available as f64 / total as f64) * 100.0).round() as u32
}

/// Score one window against every response.
///
/// `plan_start`/`plan_end` bound the adjacency check: a free day just outside
/// the window only counts if it is still inside the plan range.
pub fn score_window(
    window: &Window,
    responses: &[Response],
    plan_start: NaiveDate,
    plan_end: NaiveDate,
) -> ScoredWindow {
    let window_dates = window.dates();
    let mut available_count = 0;
    let mut blockers = Vec::new();

    for response in responses {
        let missing: Vec<NaiveDate> = window_dates
            .iter()
            .copied()
            .filter(|d| !response.is_available(*d))
            .collect();

        if missing.is_empty() {
            available_count += 1;
        } else {
            blockers.push(analyze_blocker(response, window, missing, plan_start, plan_end));
        }
    }

    let total_count = responses.len();
    ScoredWindow {
        start: window.start,
        end: window.end,
        available_count,
        total_count,
        percentage: percentage_of(available_count, total_count),
        blockers,
    }
}

/// Build the blocker record for a respondent missing `missing_dates` of `window`.
///
/// A shift is suggested toward whichever adjacent day the respondent is free
/// on, by as many days as they are missing. When both sides qualify, earlier
/// wins.
pub fn analyze_blocker(
    response: &Response,
    window: &Window,
    missing_dates: Vec<NaiveDate>,
    plan_start: NaiveDate,
    plan_end: NaiveDate,
) -> BlockerInfo {
    let in_plan = |d: NaiveDate| plan_start <= d && d <= plan_end;
    let day_before = add_days(window.start, -1);
    let day_after = add_days(window.end, 1);

    // A neighbour past the calendar edge is outside any plan.
    let free_neighbour =
        |d: Option<NaiveDate>| d.is_some_and(|d| in_plan(d) && response.is_available(d));
    let has_adjacent_before = free_neighbour(day_before);
    let has_adjacent_after = free_neighbour(day_after);

    let missing_count = missing_dates.len();
    // TODO: when both sides are free, prefer the side whose shifted window covers more of the respondent's dates.
    let (shift_direction, shift_days) = if has_adjacent_before {
        (Some(ShiftDirection::Earlier), missing_count as u32)
    } else if has_adjacent_after {
        (Some(ShiftDirection::Later), missing_count as u32)
    } else {
        (None, 0)
    };

    BlockerInfo {
        respondent_id: response.id.clone(),
        name: response.name.clone(),
        missing_dates,
        missing_count,
        has_adjacent_before,
        has_adjacent_after,
        shift_direction,
        shift_days,
    }
}

/// Score every `num_days` window in the range, best first.
///
/// Sorted by percentage descending, then by start date ascending.
pub fn score_all_windows(
    start_range: NaiveDate,
    end_range: NaiveDate,
    num_days: u32,
    responses: &[Response],
) -> Vec<ScoredWindow> {
    let mut scored: Vec<ScoredWindow> = generate_windows(start_range, end_range, num_days)
        .iter()
        .map(|w| score_window(w, responses, start_range, end_range))
        .collect();

    scored.sort_by(|a, b| b.percentage.cmp(&a.percentage).then(a.start.cmp(&b.start)));

    trace!(
        target: "trip_engine::scorer",
        num_days,
        windows = scored.len(),
        best = scored.first().map(|w| w.percentage),
        "scored windows"
    );
    scored
}

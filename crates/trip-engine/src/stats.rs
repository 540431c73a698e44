//! Derived views over scored windows for the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{add_days, DateRange};
use crate::model::{Plan, Response};
use crate::scorer::{percentage_of, ScoredWindow};

/// Windows everyone can make, earliest first.
pub fn compatible_windows(scored: &[ScoredWindow]) -> Vec<&ScoredWindow> {
    let mut perfect: Vec<&ScoredWindow> = scored.iter().filter(|w| w.is_perfect()).collect();
    perfect.sort_by_key(|w| w.start);
    perfect
}

/// Merge overlapping or touching perfect windows into maximal date ranges.
///
/// Any `num_days` slice of a returned range is itself a window everyone can make.
pub fn compatible_ranges(scored: &[ScoredWindow]) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::new();
    for window in compatible_windows(scored) {
        if let Some(last) = merged.last_mut() {
            if add_days(last.end, 1).is_none_or(|next| window.start <= next) {
                last.end = last.end.max(window.end);
                continue;
            }
        }
        merged.push(DateRange::new(window.start, window.end));
    }
    merged
}

/// Summary of how close the plan is to a window that works for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMatchStats {
    pub total_windows: usize,
    pub perfect_windows: usize,
    pub best_percentage: u32,
    pub best_available_count: usize,
    pub total_count: usize,
    /// Windows sharing the best percentage.
    pub windows_at_best: usize,
    /// Windows at least one respondent can fully make.
    pub windows_with_anyone: usize,
    /// Respondents blocking the best window.
    pub best_blocker_count: usize,
}

/// Stats over a best-first list of scored windows. `None` when there are none.
pub fn partial_match_stats(scored: &[ScoredWindow]) -> Option<PartialMatchStats> {
    let best = scored.first()?;
    Some(PartialMatchStats {
        total_windows: scored.len(),
        perfect_windows: scored.iter().filter(|w| w.is_perfect()).count(),
        best_percentage: best.percentage,
        best_available_count: best.available_count,
        total_count: best.total_count,
        windows_at_best: scored
            .iter()
            .filter(|w| w.percentage == best.percentage)
            .count(),
        windows_with_anyone: scored.iter().filter(|w| w.available_count > 0).count(),
        best_blocker_count: best.blockers.len(),
    })
}

/// Who is free on one plan day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available_ids: Vec<String>,
    pub available_count: usize,
    pub percentage: u32,
}

/// Per-day availability across the plan range, in date order.
pub fn daily_availability(plan: &Plan, responses: &[Response]) -> Vec<DayAvailability> {
    plan.dates()
        .into_iter()
        .map(|date| {
            let available_ids: Vec<String> = responses
                .iter()
                .filter(|r| r.is_available(date))
                .map(|r| r.id.clone())
                .collect();
            let available_count = available_ids.len();
            DayAvailability {
                date,
                available_ids,
                available_count,
                percentage: percentage_of(available_count, responses.len()),
            }
        })
        .collect()
}

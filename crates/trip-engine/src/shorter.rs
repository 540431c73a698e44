//! Search for a shorter trip that every respondent can make.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::model::Response;
use crate::scorer::{score_all_windows, ScoredWindow};

/// A shorter duration with at least one window where everyone is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorterTripSuggestion {
    /// The shorter trip length, in days.
    pub duration: u32,
    /// How many days shorter than the requested trip.
    pub days_shorter: u32,
    /// Example 100% windows at `duration`, earliest first.
    pub windows: Vec<ScoredWindow>,
}

/// Probe up to three shorter durations, longest first, with the default config.
///
/// See [`find_shorter_perfect_windows_with`].
pub fn find_shorter_perfect_windows(
    responses: &[Response],
    start_range: NaiveDate,
    end_range: NaiveDate,
    original_duration: u32,
) -> Option<ShorterTripSuggestion> {
    find_shorter_perfect_windows_with(
        responses,
        start_range,
        end_range,
        original_duration,
        &EngineConfig::default(),
    )
}

/// Probe durations `original - 1` down to `max(1, original - max_trip_reduction)`.
///
/// Returns the first (longest) duration that has a 100% window, with up to
/// `shorter_trip_examples` of those windows. Durations further below are never
/// examined, so `None` means "no luck in the probed band", not "impossible".
pub fn find_shorter_perfect_windows_with(
    responses: &[Response],
    start_range: NaiveDate,
    end_range: NaiveDate,
    original_duration: u32,
    config: &EngineConfig,
) -> Option<ShorterTripSuggestion> {
    if responses.is_empty() || original_duration <= 1 {
        return None;
    }
    let shortest = original_duration
        .saturating_sub(config.max_trip_reduction)
        .max(1);

    for duration in (shortest..original_duration).rev() {
        let perfect: Vec<ScoredWindow> = score_all_windows(start_range, end_range, duration, responses)
            .into_iter()
            .filter(ScoredWindow::is_perfect)
            .take(config.shorter_trip_examples)
            .collect();

        if !perfect.is_empty() {
            debug!(
                target: "trip_engine::shorter",
                original_duration,
                duration,
                examples = perfect.len(),
                "found shorter perfect trip"
            );
            return Some(ShorterTripSuggestion {
                duration,
                days_shorter: original_duration - duration,
                windows: perfect,
            });
        }
    }
    None
}

//! Respondents whose availability can never cover the trip.
//!
//! Blocking a lot of good windows is not enough on its own; the respondent may
//! just be unlucky. Someone is flagged only when they also marked fewer days in
//! total than the trip needs, so no window can ever include them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::model::Response;
use crate::scorer::ScoredWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstrainingPerson {
    pub id: String,
    pub name: String,
    /// Total days the respondent marked.
    pub available_days: usize,
    /// How many of the examined top windows they block.
    pub blocked_windows: usize,
}

/// Flag constraining respondents among `top_windows` using the default thresholds.
///
/// See [`find_constraining_people_with`].
pub fn find_constraining_people(
    top_windows: &[ScoredWindow],
    responses: &[Response],
    num_days: u32,
) -> Vec<ConstrainingPerson> {
    find_constraining_people_with(top_windows, responses, num_days, &EngineConfig::default())
}

/// Flag respondents who block at least `min_blocked_top_windows` of the first
/// `top_windows_examined` windows and marked fewer than `num_days` days.
///
/// Nothing is flagged when fewer than `min_windows_for_constraint` windows are
/// available to examine. Output is sorted by `available_days` ascending, most
/// constrained first.
///
/// Blocked windows are tallied per respondent id, so two respondents who
/// share a display name are counted separately.
pub fn find_constraining_people_with(
    top_windows: &[ScoredWindow],
    responses: &[Response],
    num_days: u32,
    config: &EngineConfig,
) -> Vec<ConstrainingPerson> {
    let examined = &top_windows[..top_windows.len().min(config.top_windows_examined)];
    if examined.len() < config.min_windows_for_constraint {
        return Vec::new();
    }

    let mut constrainers: Vec<ConstrainingPerson> = responses
        .iter()
        .filter_map(|response| {
            let blocked_windows = examined
                .iter()
                .filter(|w| w.is_blocked_by(&response.id))
                .count();
            let available_days = response.available_day_count();
            let constraining = blocked_windows >= config.min_blocked_top_windows
                && available_days < num_days as usize;

            constraining.then(|| ConstrainingPerson {
                id: response.id.clone(),
                name: response.name.clone(),
                available_days,
                blocked_windows,
            })
        })
        .collect();

    constrainers.sort_by_key(|c| c.available_days);

    if !constrainers.is_empty() {
        debug!(
            target: "trip_engine::constrainers",
            ids = ?constrainers.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            "flagged constraining respondents"
        );
    }
    constrainers
}

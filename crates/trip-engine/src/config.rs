//! Tunable thresholds for the recommendation cascade.
//!
//! The defaults reproduce the engine's standard behaviour. A config can be
//! deserialized from a partial JSON object; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many days shorter than the requested trip the shorter-trip search probes.
    pub max_trip_reduction: u32,
    /// Example windows returned with a shorter-trip suggestion.
    pub shorter_trip_examples: usize,
    /// Number of top-scored windows examined for constraining respondents.
    pub top_windows_examined: usize,
    /// Below this many top windows, no one is flagged as constraining.
    pub min_windows_for_constraint: usize,
    /// A respondent must block at least this many top windows to be constraining.
    pub min_blocked_top_windows: usize,
    /// Best-window percentage at which the "good enough" rule fires.
    pub good_enough_percentage: u32,
    /// The range is tight when `range_days < num_days * tight_range_factor`.
    pub tight_range_factor: f64,
    /// Percentage points from the best window within which windows are comparable.
    pub comparable_margin: u32,
    /// Alternative windows attached to the "good enough" and fallback rules.
    pub max_alternatives: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_trip_reduction: 3,
            shorter_trip_examples: 3,
            top_windows_examined: 5,
            min_windows_for_constraint: 3,
            min_blocked_top_windows: 3,
            good_enough_percentage: 80,
            tight_range_factor: 1.5,
            comparable_margin: 5,
            max_alternatives: 3,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the cascade meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.top_windows_examined == 0 {
            return Err(EngineError::InvalidConfig(
                "top_windows_examined must be at least 1".to_string(),
            ));
        }
        if !self.tight_range_factor.is_finite() || self.tight_range_factor <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "tight_range_factor must be a positive number, got {}",
                self.tight_range_factor
            )));
        }
        if self.good_enough_percentage > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "good_enough_percentage must be at most 100, got {}",
                self.good_enough_percentage
            )));
        }
        Ok(())
    }
}

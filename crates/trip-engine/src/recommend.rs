//! Top-level evaluation: plan + responses → recommendation.
//!
//! Pipeline: score every window, run the shorter-trip and constraining-people
//! side analyses, then evaluate the rule cascade. The best match becomes
//! [`RecommendationResult::primary`]; the other matches, in priority order,
//! become [`RecommendationResult::alternatives`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::constrainers::find_constraining_people_with;
use crate::error::Result;
use crate::model::{EvaluationInput, Plan, Response};
use crate::rules::{evaluate_rules, RuleContext};
use crate::scorer::{score_all_windows, ScoredWindow, ShiftDirection};
use crate::shorter::{find_shorter_perfect_windows_with, ShorterTripSuggestion};
use crate::status::Status;

/// One piece of guidance produced by a rule.
///
/// `blocker_id` and `constraining_person_ids` let the presentation layer tell
/// whether the viewer is the person being talked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1 (most specific) to 9 (fallback).
    pub priority: u8,
    pub status: Status,
    pub headline: String,
    pub detail: String,
    pub recommendation_text: String,
    pub best_window: Option<ScoredWindow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_windows: Vec<ScoredWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorter_trip_suggestion: Option<ShorterTripSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker_shift_direction: Option<ShiftDirection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraining_person_ids: Vec<String>,
}

impl Recommendation {
    /// An empty recommendation for a rule to fill in.
    pub fn new(priority: u8, status: Status) -> Self {
        Self {
            priority,
            status,
            headline: String::new(),
            detail: String::new(),
            recommendation_text: String::new(),
            best_window: None,
            alternative_windows: Vec::new(),
            shorter_trip_suggestion: None,
            blocker_id: None,
            blocker_shift_direction: None,
            constraining_person_ids: Vec::new(),
        }
    }

    /// Whether this recommendation singles out `respondent_id`.
    pub fn concerns(&self, respondent_id: &str) -> bool {
        self.blocker_id.as_deref() == Some(respondent_id)
            || self.constraining_person_ids.iter().any(|id| id == respondent_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub primary: Recommendation,
    /// Other matching rules, ascending priority.
    pub alternatives: Vec<Recommendation>,
}

impl RecommendationResult {
    /// Primary followed by the alternatives.
    pub fn all(&self) -> impl Iterator<Item = &Recommendation> {
        std::iter::once(&self.primary).chain(self.alternatives.iter())
    }

    pub fn priorities(&self) -> Vec<u8> {
        self.all().map(|r| r.priority).collect()
    }
}

/// Evaluate with the default config. `None` when there are no responses.
pub fn evaluate(plan: &Plan, responses: &[Response]) -> Option<RecommendationResult> {
    evaluate_with_config(plan, responses, &EngineConfig::default())
}

/// Evaluate a plan against its responses.
///
/// Returns `None` when `responses` is empty; there is nothing to recommend
/// from and no percentage to compute.
pub fn evaluate_with_config(
    plan: &Plan,
    responses: &[Response],
    config: &EngineConfig,
) -> Option<RecommendationResult> {
    if responses.is_empty() {
        debug!(target: "trip_engine::recommend", "no responses, nothing to evaluate");
        return None;
    }

    let scored = score_all_windows(plan.start_range, plan.end_range, plan.num_days, responses);
    let shorter = find_shorter_perfect_windows_with(
        responses,
        plan.start_range,
        plan.end_range,
        plan.num_days,
        config,
    );
    let top = &scored[..scored.len().min(config.top_windows_examined)];
    let constrainers = find_constraining_people_with(top, responses, plan.num_days, config);

    let ctx = RuleContext::new(
        plan,
        &scored,
        responses,
        shorter.as_ref(),
        &constrainers,
        config,
    );
    let mut matched = evaluate_rules(&ctx).into_iter();
    let primary = matched.next()?;
    let alternatives: Vec<Recommendation> = matched.collect();

    debug!(
        target: "trip_engine::recommend",
        windows = scored.len(),
        respondents = responses.len(),
        best = scored.first().map(|w| w.percentage),
        primary = primary.priority,
        alternatives = alternatives.len(),
        "evaluated plan"
    );

    Some(RecommendationResult {
        primary,
        alternatives,
    })
}

/// Parse an ISO-string request and evaluate it.
///
/// Uses the request's embedded config when present, otherwise the default.
///
/// # Errors
/// Returns `EngineError::InvalidDate`/`InvalidPlan`/`InvalidConfig` on bad input.
pub fn evaluate_iso(input: &EvaluationInput) -> Result<Option<RecommendationResult>> {
    let (plan, responses) = input.parse()?;
    let config = input.config.clone().unwrap_or_default();
    config.validate()?;
    Ok(evaluate_with_config(&plan, &responses, &config))
}

//! WASM bindings for trip-engine.
//!
//! Exposes window generation, scoring, recommendation and availability stats
//! to JavaScript via `wasm-bindgen`. All complex values cross the boundary as
//! JSON strings; dates are `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p trip-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/trip-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/trip_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use trip_engine::dates::parse_date;
use trip_engine::{EngineConfig, EvaluationInput, PlanInput, ResponseInput};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WindowDto {
    start: NaiveDate,
    end: NaiveDate,
    label: String,
}

#[derive(Serialize)]
struct StatsDto {
    partial_match: Option<trip_engine::PartialMatchStats>,
    compatible_ranges: Vec<trip_engine::DateRange>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_input(
    plan_json: &str,
    responses_json: &str,
) -> Result<(trip_engine::Plan, Vec<trip_engine::Response>), JsValue> {
    let plan: PlanInput = serde_json::from_str(plan_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid plan JSON: {}", e)))?;
    let responses: Vec<ResponseInput> = serde_json::from_str(responses_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid responses JSON: {}", e)))?;

    let plan = plan.to_plan().map_err(js_err)?;
    let responses = responses
        .iter()
        .map(ResponseInput::to_response)
        .collect::<Result<Vec<_>, _>>()
        .map_err(js_err)?;
    Ok((plan, responses))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Evaluate a plan against its responses.
///
/// `plan_json` is `{startRange, endRange, numDays}`; `responses_json` is an
/// array of `{id, name, availableDates}`. Returns the recommendation result as
/// JSON, or the string `null` when there are no responses.
#[wasm_bindgen(js_name = "evaluate")]
pub fn evaluate(plan_json: &str, responses_json: &str) -> Result<String, JsValue> {
    let (plan, responses) = parse_input(plan_json, responses_json)?;
    to_json(&trip_engine::evaluate(&plan, &responses))
}

/// Like [`evaluate`], with threshold overrides given as a (partial) JSON object.
#[wasm_bindgen(js_name = "evaluateWithConfig")]
pub fn evaluate_with_config(
    plan_json: &str,
    responses_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let (plan, responses) = parse_input(plan_json, responses_json)?;
    let config = EngineConfig::from_json(config_json).map_err(js_err)?;
    to_json(&trip_engine::evaluate_with_config(&plan, &responses, &config))
}

/// Evaluate a single `{plan, responses, config?}` document.
#[wasm_bindgen(js_name = "evaluateRequest")]
pub fn evaluate_request(input_json: &str) -> Result<String, JsValue> {
    let input = EvaluationInput::from_json(input_json).map_err(js_err)?;
    to_json(&trip_engine::evaluate_iso(&input).map_err(js_err)?)
}

/// All scored windows for the plan, best first.
#[wasm_bindgen(js_name = "scoreAllWindows")]
pub fn score_all_windows(plan_json: &str, responses_json: &str) -> Result<String, JsValue> {
    let (plan, responses) = parse_input(plan_json, responses_json)?;
    to_json(&trip_engine::score_all_windows(
        plan.start_range,
        plan.end_range,
        plan.num_days,
        &responses,
    ))
}

/// Every `num_days` window between two `YYYY-MM-DD` dates, with display labels.
#[wasm_bindgen(js_name = "generateWindows")]
pub fn generate_windows(start_range: &str, end_range: &str, num_days: u32) -> Result<String, JsValue> {
    let start = parse_date(start_range).map_err(js_err)?;
    let end = parse_date(end_range).map_err(js_err)?;
    let dtos: Vec<WindowDto> = trip_engine::generate_windows(start, end, num_days)
        .iter()
        .map(|w| WindowDto {
            start: w.start,
            end: w.end,
            label: w.label(),
        })
        .collect();
    to_json(&dtos)
}

/// Partial-match stats and compatible ranges for the plan.
#[wasm_bindgen(js_name = "partialMatchStats")]
pub fn partial_match_stats(plan_json: &str, responses_json: &str) -> Result<String, JsValue> {
    let (plan, responses) = parse_input(plan_json, responses_json)?;
    let scored =
        trip_engine::score_all_windows(plan.start_range, plan.end_range, plan.num_days, &responses);
    to_json(&StatsDto {
        partial_match: trip_engine::partial_match_stats(&scored),
        compatible_ranges: trip_engine::compatible_ranges(&scored),
    })
}

/// Who is free on each day of the plan range.
#[wasm_bindgen(js_name = "dailyAvailability")]
pub fn daily_availability(plan_json: &str, responses_json: &str) -> Result<String, JsValue> {
    let (plan, responses) = parse_input(plan_json, responses_json)?;
    to_json(&trip_engine::daily_availability(&plan, &responses))
}

/// Status label (`perfect`, `great`, `good`, `possible`, `unlikely`) for a percentage.
#[wasm_bindgen(js_name = "statusFromPercentage")]
pub fn status_from_percentage(percentage: u32) -> String {
    trip_engine::status_from_percentage(percentage).to_string()
}

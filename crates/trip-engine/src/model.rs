//! Plan and response values, plus the ISO-string forms they arrive in.
//!
//! [`Plan`] and [`Response`] are the typed inputs of the engine. [`PlanInput`],
//! [`ResponseInput`] and [`EvaluationInput`] mirror the JSON shapes supplied by
//! the surrounding API (camelCase or snake_case keys, dates as `YYYY-MM-DD`
//! strings) and convert into the typed values, failing on malformed dates.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dates::{self, parse_date};
use crate::error::{EngineError, Result};

/// The date range being planned and the required trip length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub start_range: NaiveDate,
    pub end_range: NaiveDate,
    pub num_days: u32,
}

impl Plan {
    /// Build a plan, checking `start_range <= end_range` and `num_days >= 1`.
    ///
    /// A trip longer than the range is allowed; it simply has no windows.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidPlan` when either invariant is violated.
    pub fn new(start_range: NaiveDate, end_range: NaiveDate, num_days: u32) -> Result<Self> {
        if start_range > end_range {
            return Err(EngineError::InvalidPlan(format!(
                "start {} is after end {}",
                dates::format_date(start_range),
                dates::format_date(end_range)
            )));
        }
        if num_days == 0 {
            return Err(EngineError::InvalidPlan(
                "trip length must be at least one day".to_string(),
            ));
        }
        Ok(Self {
            start_range,
            end_range,
            num_days,
        })
    }

    /// Days in the plan's range, both ends included.
    pub fn range_days(&self) -> i64 {
        dates::range_days(self.start_range, self.end_range)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        dates::expand_interval(self.start_range, self.end_range)
    }
}

/// One respondent's availability.
///
/// `available_dates` may include days outside the plan range; scoring only
/// ever looks at the dates of the window being scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub name: String,
    pub available_dates: BTreeSet<NaiveDate>,
}

impl Response {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        available_dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available_dates: available_dates.into_iter().collect(),
        }
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.available_dates.contains(&date)
    }

    /// Total number of distinct days this respondent marked, in or out of range.
    pub fn available_day_count(&self) -> usize {
        self.available_dates.len()
    }
}

/// A plan as supplied over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    #[serde(alias = "startRange")]
    pub start_range: String,
    #[serde(alias = "endRange")]
    pub end_range: String,
    #[serde(alias = "numDays")]
    pub num_days: u32,
}

impl PlanInput {
    /// Parse the date strings and validate the plan.
    pub fn to_plan(&self) -> Result<Plan> {
        Plan::new(
            parse_date(&self.start_range)?,
            parse_date(&self.end_range)?,
            self.num_days,
        )
    }
}

/// A response as supplied over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInput {
    pub id: String,
    pub name: String,
    #[serde(alias = "availableDates", default)]
    pub available_dates: Vec<String>,
}

impl ResponseInput {
    /// Parse every date string; the first malformed one fails the whole response.
    pub fn to_response(&self) -> Result<Response> {
        let dates = self
            .available_dates
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Response::new(self.id.clone(), self.name.clone(), dates))
    }
}

/// A complete evaluation request: plan, responses and optional config overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub plan: PlanInput,
    #[serde(default)]
    pub responses: Vec<ResponseInput>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

impl EvaluationInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into typed values.
    pub fn parse(&self) -> Result<(Plan, Vec<Response>)> {
        let plan = self.plan.to_plan()?;
        let responses = self
            .responses
            .iter()
            .map(ResponseInput::to_response)
            .collect::<Result<Vec<_>>>()?;
        Ok((plan, responses))
    }
}

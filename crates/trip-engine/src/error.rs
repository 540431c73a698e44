//! Error types for trip-engine operations.
//!
//! Only the input boundary can fail: parsing date strings, validating a plan
//! or a config. Scoring and rule evaluation are total over validated input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

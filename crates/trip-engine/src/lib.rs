//! # trip-engine
//!
//! Availability window scoring and recommendation engine for group trip planning.
//!
//! Participants mark the calendar days they are free inside a plan's candidate
//! range. The engine enumerates every contiguous `num_days` window in that range,
//! scores each one by how many respondents are fully available, works out who is
//! blocking each window (and whether a small shift would fix it), and runs a
//! nine-tier rule cascade that turns the numbers into an actionable
//! recommendation plus ranked alternatives.
//!
//! Everything here is a pure function of a [`Plan`] and a slice of [`Response`]s.
//! There is no I/O, no shared state and no caching; callers memoize if they want to.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trip_engine::{evaluate, Plan, Response};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
//! let plan = Plan::new(start, end, 3).unwrap();
//!
//! let everyday: Vec<NaiveDate> = start.iter_days().take(10).collect();
//! let responses = vec![
//!     Response::new("a", "Ana", everyday.clone()),
//!     Response::new("b", "Ben", everyday),
//! ];
//!
//! let result = evaluate(&plan, &responses).unwrap();
//! assert_eq!(result.primary.priority, 1);
//! ```
//!
//! ## Modules
//!
//! - [`dates`] — ISO date parsing/formatting, interval expansion, consecutive grouping
//! - [`model`] — `Plan`, `Response` and their ISO-string input forms
//! - [`windows`] — sliding `num_days` window enumeration
//! - [`scorer`] — per-window availability scoring and blocker analysis
//! - [`shift`] — validation of "shift your dates" suggestions
//! - [`shorter`] — search for a shorter trip that everyone can make
//! - [`constrainers`] — respondents whose availability can never fit the trip
//! - [`rules`] — the prioritized recommendation rule cascade
//! - [`status`] — percentage → status classification
//! - [`recommend`] — the top-level `evaluate` entry points
//! - [`stats`] — compatible ranges, partial-match stats, daily availability
//! - [`config`] — tunable thresholds of the cascade
//! - [`error`] — Error types

pub mod config;
pub mod constrainers;
pub mod dates;
pub mod error;
pub mod model;
pub mod recommend;
pub mod rules;
pub mod scorer;
pub mod shift;
pub mod shorter;
pub mod stats;
pub mod status;
pub mod windows;

pub use config::EngineConfig;
pub use constrainers::{find_constraining_people, ConstrainingPerson};
pub use dates::DateRange;
pub use error::EngineError;
pub use model::{EvaluationInput, Plan, PlanInput, Response, ResponseInput};
pub use recommend::{evaluate, evaluate_iso, evaluate_with_config, Recommendation, RecommendationResult};
pub use rules::{evaluate_rules, Rule, RuleContext};
pub use scorer::{analyze_blocker, score_all_windows, score_window, BlockerInfo, ScoredWindow, ShiftDirection};
pub use shift::validate_shifted_window;
pub use shorter::{find_shorter_perfect_windows, ShorterTripSuggestion};
pub use stats::{compatible_ranges, compatible_windows, daily_availability, partial_match_stats, DayAvailability, PartialMatchStats};
pub use status::{status_from_percentage, Status};
pub use windows::{generate_windows, Window};

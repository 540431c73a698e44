//! The nine-tier recommendation rule cascade.
//!
//! Each [`Rule`] pairs a `matches` predicate with a `create` builder over a
//! shared, read-only [`RuleContext`]. Every rule is checked independently and
//! all matches are returned, ordered by priority (1 first). The caller takes
//! the first as the primary recommendation and the rest as alternatives.
//!
//! | P | Rule | Fires when |
//! |---|------|------------|
//! | 1 | `PerfectMatch` | best window is 100% |
//! | 2 | `ShiftDates` | one blocker, and shifting toward their free adjacent day stays in range |
//! | 3 | `SingleBlocker` | one blocker, no valid shift |
//! | 4 | `ShorterTrip` | a shorter trip has a 100% window |
//! | 5 | `ConstrainingPeople` | someone marked fewer days than the trip needs |
//! | 6 | `GoodEnough` | best window is at least 80% |
//! | 7 | `TightRange` | range is shorter than 1.5x the trip |
//! | 8 | `ComparableChoice` | two near-best windows have different blockers |
//! | 9 | `KeepExploring` | always |
//!
//! Rules 1, 2, 3, 6 and 8 need a best window; the others also work without one.

use chrono::NaiveDate;
use tracing::trace;

use crate::config::EngineConfig;
use crate::constrainers::ConstrainingPerson;
use crate::dates::{self, describe_dates};
use crate::model::{Plan, Response};
use crate::recommend::Recommendation;
use crate::scorer::{score_window, BlockerInfo, ScoredWindow, ShiftDirection};
use crate::shift::{shifted_window, validate_shifted_window};
use crate::shorter::ShorterTripSuggestion;
use crate::status::{status_from_percentage, Status};

/// Everything the rules look at. Built once per evaluation and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Top of `scored_windows`, or `None` when no window fits the range.
    pub best_window: Option<&'a ScoredWindow>,
    /// All windows, best first.
    pub scored_windows: &'a [ScoredWindow],
    pub total_count: usize,
    pub responses: &'a [Response],
    pub num_days: u32,
    pub start_range: NaiveDate,
    pub end_range: NaiveDate,
    pub shorter_trip: Option<&'a ShorterTripSuggestion>,
    pub constrainers: &'a [ConstrainingPerson],
    pub config: &'a EngineConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        plan: &Plan,
        scored_windows: &'a [ScoredWindow],
        responses: &'a [Response],
        shorter_trip: Option<&'a ShorterTripSuggestion>,
        constrainers: &'a [ConstrainingPerson],
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            best_window: scored_windows.first(),
            scored_windows,
            total_count: responses.len(),
            responses,
            num_days: plan.num_days,
            start_range: plan.start_range,
            end_range: plan.end_range,
            shorter_trip,
            constrainers,
            config,
        }
    }

    pub fn range_days(&self) -> i64 {
        dates::range_days(self.start_range, self.end_range)
    }

    /// Status of the best window; `Unlikely` when there is none.
    fn status(&self) -> Status {
        status_from_percentage(self.best_window.map_or(0, |w| w.percentage))
    }

    /// The blocker of the best window, when there is exactly one.
    fn single_blocker(&self) -> Option<(&'a ScoredWindow, &'a BlockerInfo)> {
        let best = self.best_window?;
        match best.blockers.as_slice() {
            [only] => Some((best, only)),
            _ => None,
        }
    }

    /// The shift direction of `blocker` if moving `window` that way stays in range.
    fn valid_shift(&self, window: &ScoredWindow, blocker: &BlockerInfo) -> Option<ShiftDirection> {
        let direction = blocker.shift_direction?;
        validate_shifted_window(
            window.start,
            blocker.shift_days,
            direction,
            self.start_range,
            self.end_range,
            self.num_days,
        )
        .then_some(direction)
    }

    /// Up to `max_alternatives` windows after the best one.
    fn runner_ups(&self) -> Vec<ScoredWindow> {
        self.scored_windows
            .iter()
            .skip(1)
            .take(self.config.max_alternatives)
            .cloned()
            .collect()
    }

    /// The first two windows within `comparable_margin` points of the best,
    /// when their blocker sets differ.
    fn comparable_pair(&self) -> Option<(&'a ScoredWindow, &'a ScoredWindow)> {
        let best = self.best_window?;
        let mut near = self
            .scored_windows
            .iter()
            .filter(|w| best.percentage.saturating_sub(w.percentage) <= self.config.comparable_margin);
        let first = near.next()?;
        let second = near.next()?;
        (first.blocker_ids() != second.blocker_ids()).then_some((first, second))
    }
}

/// One tier of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    PerfectMatch,
    ShiftDates,
    SingleBlocker,
    ShorterTrip,
    ConstrainingPeople,
    GoodEnough,
    TightRange,
    ComparableChoice,
    KeepExploring,
}

impl Rule {
    /// Every rule, in priority order.
    pub const ALL: [Rule; 9] = [
        Rule::PerfectMatch,
        Rule::ShiftDates,
        Rule::SingleBlocker,
        Rule::ShorterTrip,
        Rule::ConstrainingPeople,
        Rule::GoodEnough,
        Rule::TightRange,
        Rule::ComparableChoice,
        Rule::KeepExploring,
    ];

    /// Lower is more specific and is shown first.
    pub fn priority(self) -> u8 {
        match self {
            Rule::PerfectMatch => 1,
            Rule::ShiftDates => 2,
            Rule::SingleBlocker => 3,
            Rule::ShorterTrip => 4,
            Rule::ConstrainingPeople => 5,
            Rule::GoodEnough => 6,
            Rule::TightRange => 7,
            Rule::ComparableChoice => 8,
            Rule::KeepExploring => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rule::PerfectMatch => "perfect_match",
            Rule::ShiftDates => "shift_dates",
            Rule::SingleBlocker => "single_blocker",
            Rule::ShorterTrip => "shorter_trip",
            Rule::ConstrainingPeople => "constraining_people",
            Rule::GoodEnough => "good_enough",
            Rule::TightRange => "tight_range",
            Rule::ComparableChoice => "comparable_choice",
            Rule::KeepExploring => "keep_exploring",
        }
    }

    pub fn matches(self, ctx: &RuleContext<'_>) -> bool {
        match self {
            Rule::PerfectMatch => ctx.best_window.is_some_and(|w| w.percentage == 100),
            Rule::ShiftDates => ctx
                .single_blocker()
                .is_some_and(|(w, b)| ctx.valid_shift(w, b).is_some()),
            Rule::SingleBlocker => ctx
                .single_blocker()
                .is_some_and(|(w, b)| ctx.valid_shift(w, b).is_none()),
            Rule::ShorterTrip => ctx.shorter_trip.is_some(),
            Rule::ConstrainingPeople => !ctx.constrainers.is_empty(),
            Rule::GoodEnough => ctx
                .best_window
                .is_some_and(|w| w.percentage >= ctx.config.good_enough_percentage),
            Rule::TightRange => {
                (ctx.range_days() as f64) < f64::from(ctx.num_days) * ctx.config.tight_range_factor
            }
            Rule::ComparableChoice => ctx.comparable_pair().is_some(),
            Rule::KeepExploring => true,
        }
    }

    /// Build this rule's recommendation. Only meaningful when [`Rule::matches`] holds.
    pub fn create(self, ctx: &RuleContext<'_>) -> Recommendation {
        let mut rec = Recommendation::new(self.priority(), ctx.status());
        match self {
            Rule::PerfectMatch => perfect_match(ctx, &mut rec),
            Rule::ShiftDates => shift_dates(ctx, &mut rec),
            Rule::SingleBlocker => single_blocker(ctx, &mut rec),
            Rule::ShorterTrip => shorter_trip(ctx, &mut rec),
            Rule::ConstrainingPeople => constraining_people(ctx, &mut rec),
            Rule::GoodEnough => good_enough(ctx, &mut rec),
            Rule::TightRange => tight_range(ctx, &mut rec),
            Rule::ComparableChoice => comparable_choice(ctx, &mut rec),
            Rule::KeepExploring => keep_exploring(ctx, &mut rec),
        }
        rec
    }
}

/// Run every rule and return the matching recommendations, priority 1 first.
pub fn evaluate_rules(ctx: &RuleContext<'_>) -> Vec<Recommendation> {
    let mut matched: Vec<Recommendation> = Rule::ALL
        .iter()
        .filter(|rule| {
            let hit = rule.matches(ctx);
            trace!(target: "trip_engine::rules", rule = rule.name(), hit, "rule checked");
            hit
        })
        .map(|rule| rule.create(ctx))
        .collect();
    matched.sort_by_key(|r| r.priority);
    matched
}

// ── Builders ────────────────────────────────────────────────────────────────

fn perfect_match(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some(best) = ctx.best_window else { return };
    rec.headline = "Everyone can make it!".to_string();
    rec.detail = format!(
        "All {} are free {}.",
        count_noun(ctx.total_count, "person", "people"),
        best.label()
    );
    rec.recommendation_text = format!("Lock in {} and start booking.", best.label());
    rec.best_window = Some(best.clone());
}

fn shift_dates(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some((best, blocker)) = ctx.single_blocker() else { return };
    let Some(direction) = ctx.valid_shift(best, blocker) else { return };

    let Some(shifted) = shifted_window(best.start, blocker.shift_days, direction, ctx.num_days) else {
        return;
    };
    let shifted_scored = score_window(&shifted, ctx.responses, ctx.start_range, ctx.end_range);
    let free_side = match direction {
        ShiftDirection::Earlier => "the day before",
        ShiftDirection::Later => "the day after",
    };

    rec.headline = format!("Almost there: only {} is missing", blocker.name);
    rec.detail = format!(
        "{} of {} are free {}. {} can't do {} but is free {}.",
        best.available_count,
        ctx.total_count,
        best.label(),
        blocker.name,
        describe_dates(&blocker.missing_dates),
        free_side
    );
    rec.recommendation_text = format!(
        "Shift the trip {} {} to {} so {} can join.",
        count_noun(blocker.shift_days as usize, "day", "days"),
        direction,
        shifted.label(),
        blocker.name
    );
    rec.best_window = Some(best.clone());
    rec.alternative_windows = vec![shifted_scored];
    rec.blocker_id = Some(blocker.respondent_id.clone());
    rec.blocker_shift_direction = Some(direction);
}

fn single_blocker(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some((best, blocker)) = ctx.single_blocker() else { return };
    rec.headline = format!("Everyone but {} can make it", blocker.name);
    rec.detail = format!(
        "{} of {} are free {}. {} can't do {}.",
        best.available_count,
        ctx.total_count,
        best.label(),
        blocker.name,
        describe_dates(&blocker.missing_dates)
    );
    rec.recommendation_text = format!(
        "Ask {} whether {} could open up, or go ahead without them.",
        blocker.name,
        describe_dates(&blocker.missing_dates)
    );
    rec.best_window = Some(best.clone());
    rec.blocker_id = Some(blocker.respondent_id.clone());
}

fn shorter_trip(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some(shorter) = ctx.shorter_trip else { return };
    let labels = shorter
        .windows
        .iter()
        .map(ScoredWindow::label)
        .collect::<Vec<_>>()
        .join(", ");

    rec.headline = format!("A {}-day trip works for everyone", shorter.duration);
    rec.detail = format!(
        "Cutting the trip from {} to {} days fits everyone: {}.",
        ctx.num_days, shorter.duration, labels
    );
    rec.recommendation_text = format!(
        "Consider going for {} instead of {}.",
        count_noun(shorter.duration as usize, "day", "days"),
        ctx.num_days
    );
    let mut windows = shorter.windows.iter().cloned();
    rec.best_window = windows.next();
    rec.alternative_windows = windows.collect();
    rec.shorter_trip_suggestion = Some(shorter.clone());
}

fn constraining_people(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let names: Vec<&str> = ctx.constrainers.iter().map(|c| c.name.as_str()).collect();
    let counts = ctx
        .constrainers
        .iter()
        .map(|c| {
            format!(
                "{} marked {}",
                c.name,
                count_noun(c.available_days, "day", "days")
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    rec.headline = if names.len() == 1 {
        format!("{} is limiting the options", names[0])
    } else {
        format!("{} are limiting the options", join_names(&names))
    };
    rec.detail = format!("{}, fewer than the {}-day trip needs.", counts, ctx.num_days);
    rec.recommendation_text = format!("Ask {} to add more dates.", join_names(&names));
    rec.best_window = ctx.best_window.cloned();
    rec.constraining_person_ids = ctx.constrainers.iter().map(|c| c.id.clone()).collect();
}

fn good_enough(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some(best) = ctx.best_window else { return };
    rec.headline = format!("{} works for most people", best.label());
    rec.detail = format!(
        "{} of {} ({}%) are free {}.",
        best.available_count,
        ctx.total_count,
        best.percentage,
        best.label()
    );
    rec.recommendation_text = format!(
        "Go with {}, or compare it with the next best options.",
        best.label()
    );
    rec.best_window = Some(best.clone());
    rec.alternative_windows = ctx.runner_ups();
}

fn tight_range(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let wanted = (f64::from(ctx.num_days) * ctx.config.tight_range_factor).ceil() as i64;
    let extra = (wanted - ctx.range_days()).max(1);

    rec.headline = "The date range is tight".to_string();
    rec.detail = format!(
        "{} leaves {} for a {}-day trip.",
        dates::format_date_range(ctx.start_range, ctx.end_range),
        count_noun(ctx.range_days().max(0) as usize, "day", "days"),
        ctx.num_days
    );
    rec.recommendation_text = format!(
        "Widen the range by about {} to give everyone more options.",
        count_noun(extra as usize, "day", "days")
    );
    rec.best_window = ctx.best_window.cloned();
}

fn comparable_choice(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    let Some((first, second)) = ctx.comparable_pair() else { return };
    rec.headline = "Two options are neck and neck".to_string();
    rec.detail = format!(
        "{} ({}%) {}; {} ({}%) {}.",
        first.label(),
        first.percentage,
        who_misses(first),
        second.label(),
        second.percentage,
        who_misses(second)
    );
    rec.recommendation_text = format!(
        "Decide between {} and {}.",
        first.label(),
        second.label()
    );
    rec.best_window = Some(first.clone());
    rec.alternative_windows = vec![second.clone()];
}

fn keep_exploring(ctx: &RuleContext<'_>, rec: &mut Recommendation) {
    rec.headline = "Still looking for the best dates".to_string();
    match ctx.best_window {
        Some(best) => {
            rec.detail = format!(
                "The best option so far, {}, works for {} of {}.",
                best.label(),
                best.available_count,
                ctx.total_count
            );
            rec.best_window = Some(best.clone());
            rec.alternative_windows = ctx.runner_ups();
        }
        None => {
            rec.detail = format!(
                "No {}-day window fits between {} and {}.",
                ctx.num_days,
                dates::format_date(ctx.start_range),
                dates::format_date(ctx.end_range)
            );
        }
    }
    rec.recommendation_text =
        "Collect more responses or adjust the date range.".to_string();
}

// ── Text helpers ────────────────────────────────────────────────────────────

fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// `A`, `A and B`, `A, B and C`.
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn who_misses(window: &ScoredWindow) -> String {
    if window.blockers.is_empty() {
        return "works for everyone".to_string();
    }
    let names: Vec<&str> = window.blockers.iter().map(|b| b.name.as_str()).collect();
    format!("misses {}", join_names(&names))
}

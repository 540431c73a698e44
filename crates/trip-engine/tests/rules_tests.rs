//! Tests for the recommendation rule cascade.
//!
//! Each scenario builds the full rule context (scored windows plus both side
//! analyses) the same way `evaluate` does, then checks which tiers fire.

use chrono::NaiveDate;
use trip_engine::constrainers::find_constraining_people_with;
use trip_engine::dates::{expand_interval, parse_date};
use trip_engine::shorter::find_shorter_perfect_windows_with;
use trip_engine::{
    evaluate_rules, score_all_windows, ConstrainingPerson, EngineConfig, Plan, Recommendation,
    Response, Rule, RuleContext, ScoredWindow, ShiftDirection, ShorterTripSuggestion, Status,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn span(start: &str, end: &str) -> Vec<NaiveDate> {
    expand_interval(d(start), d(end))
}

fn resp(id: &str, dates: Vec<NaiveDate>) -> Response {
    Response::new(id, id.to_uppercase(), dates)
}

/// Owns everything a `RuleContext` borrows.
struct Fixture {
    plan: Plan,
    responses: Vec<Response>,
    scored: Vec<ScoredWindow>,
    shorter: Option<ShorterTripSuggestion>,
    constrainers: Vec<ConstrainingPerson>,
    config: EngineConfig,
}

impl Fixture {
    fn new(start: &str, end: &str, num_days: u32, responses: Vec<Response>) -> Self {
        Self::with_config(start, end, num_days, responses, EngineConfig::default())
    }

    fn with_config(
        start: &str,
        end: &str,
        num_days: u32,
        responses: Vec<Response>,
        config: EngineConfig,
    ) -> Self {
        let plan = Plan::new(d(start), d(end), num_days).unwrap();
        let scored = score_all_windows(plan.start_range, plan.end_range, num_days, &responses);
        let shorter = find_shorter_perfect_windows_with(
            &responses,
            plan.start_range,
            plan.end_range,
            num_days,
            &config,
        );
        let top = &scored[..scored.len().min(config.top_windows_examined)];
        let constrainers = find_constraining_people_with(top, &responses, num_days, &config);
        Self {
            plan,
            responses,
            scored,
            shorter,
            constrainers,
            config,
        }
    }

    fn ctx(&self) -> RuleContext<'_> {
        RuleContext::new(
            &self.plan,
            &self.scored,
            &self.responses,
            self.shorter.as_ref(),
            &self.constrainers,
            &self.config,
        )
    }

    fn recommendations(&self) -> Vec<Recommendation> {
        evaluate_rules(&self.ctx())
    }

    fn priorities(&self) -> Vec<u8> {
        self.recommendations().iter().map(|r| r.priority).collect()
    }

    fn tier(&self, priority: u8) -> Recommendation {
        self.recommendations()
            .into_iter()
            .find(|r| r.priority == priority)
            .unwrap_or_else(|| panic!("priority {} did not fire", priority))
    }
}

// ── Rule metadata ───────────────────────────────────────────────────────────

#[test]
fn rules_are_listed_in_priority_order() {
    let priorities: Vec<u8> = Rule::ALL.iter().map(|r| r.priority()).collect();
    assert_eq!(priorities, (1..=9).collect::<Vec<u8>>());
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn everyone_free_fires_perfect_shorter_good_enough_and_fallback() {
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-10",
        3,
        vec![
            resp("a", span("2025-06-01", "2025-06-10")),
            resp("b", span("2025-06-01", "2025-06-10")),
        ],
    );
    assert_eq!(fx.priorities(), vec![1, 4, 6, 9]);

    let perfect = fx.tier(1);
    assert_eq!(perfect.status, Status::Perfect);
    let best = perfect.best_window.unwrap();
    assert_eq!(best.start, d("2025-06-01"));
    assert_eq!(best.percentage, 100);
}

#[test]
fn single_blocker_with_valid_shift_suggests_shifting() {
    // C is free only on isolated days, so every 3-day window misses them.
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-10",
        3,
        vec![
            resp("a", span("2025-06-01", "2025-06-10")),
            resp("b", span("2025-06-01", "2025-06-10")),
            resp(
                "c",
                vec![d("2025-06-01"), d("2025-06-04"), d("2025-06-07"), d("2025-06-10")],
            ),
        ],
    );
    assert_eq!(fx.priorities(), vec![2, 4, 9]);

    let shift = fx.tier(2);
    assert_eq!(shift.status, Status::Good);
    assert_eq!(shift.blocker_id.as_deref(), Some("c"));
    assert_eq!(shift.blocker_shift_direction, Some(ShiftDirection::Later));
    assert_eq!(shift.best_window.as_ref().unwrap().start, d("2025-06-01"));
    // Missing Jun 2-3, so the preview moves two days later.
    assert_eq!(shift.alternative_windows.len(), 1);
    assert_eq!(shift.alternative_windows[0].start, d("2025-06-03"));
    assert_eq!(shift.alternative_windows[0].end, d("2025-06-05"));
    assert!(shift.recommendation_text.contains("2 days later"));
}

#[test]
fn scenario_c_single_blocker_without_shift_is_p3_not_p2() {
    let mut dates = span("2025-06-01", "2025-06-04");
    dates.push(d("2025-06-06"));
    let fx = Fixture::new("2025-06-01", "2025-06-05", 5, vec![resp("r", dates)]);

    let priorities = fx.priorities();
    assert!(priorities.contains(&3));
    assert!(!priorities.contains(&2));
    assert_eq!(priorities, vec![3, 4, 7, 9]);

    let single = fx.tier(3);
    assert_eq!(single.blocker_id.as_deref(), Some("r"));
    assert_eq!(single.blocker_shift_direction, None);
    assert_eq!(single.status, Status::Unlikely);
}

#[test]
fn shift_that_leaves_the_range_falls_back_to_p3() {
    // C's only free day is Jun 4; shifting Jun 1-3 by 3 days lands on Jun 4-6.
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-05",
        3,
        vec![
            resp("a", span("2025-06-01", "2025-06-05")),
            resp("c", vec![d("2025-06-04")]),
        ],
    );
    let best = &fx.scored[0];
    assert_eq!(best.blockers[0].shift_direction, Some(ShiftDirection::Later));
    assert_eq!(best.blockers[0].shift_days, 3);

    assert_eq!(fx.priorities(), vec![3, 4, 5, 9]);
    assert_eq!(fx.tier(5).constraining_person_ids, vec!["c".to_string()]);
}

#[test]
fn good_enough_attaches_three_alternatives() {
    let mut responses: Vec<Response> = ["a", "b", "c", "d"]
        .iter()
        .map(|id| resp(id, span("2025-06-01", "2025-06-10")))
        .collect();
    responses.push(resp("e", vec![d("2025-06-05")]));
    let fx = Fixture::new("2025-06-01", "2025-06-10", 3, responses);

    assert_eq!(fx.priorities(), vec![3, 4, 5, 6, 9]);

    let good = fx.tier(6);
    assert_eq!(good.status, Status::Great);
    assert_eq!(good.best_window.as_ref().unwrap().percentage, 80);
    let alt_starts: Vec<NaiveDate> = good.alternative_windows.iter().map(|w| w.start).collect();
    assert_eq!(
        alt_starts,
        vec![d("2025-06-02"), d("2025-06-03"), d("2025-06-04")]
    );
}

#[test]
fn comparable_windows_with_different_blockers_offer_a_choice() {
    // Jun 1-2 loses B, Jun 2-3 and Jun 3-4 lose C.
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-04",
        2,
        vec![
            resp("a", span("2025-06-01", "2025-06-04")),
            resp("b", span("2025-06-02", "2025-06-04")),
            resp("c", vec![d("2025-06-01"), d("2025-06-02"), d("2025-06-04")]),
            resp("d", span("2025-06-01", "2025-06-04")),
        ],
    );
    assert_eq!(fx.priorities(), vec![2, 4, 8, 9]);

    let choice = fx.tier(8);
    assert_eq!(choice.best_window.as_ref().unwrap().start, d("2025-06-01"));
    assert_eq!(choice.alternative_windows.len(), 1);
    assert_eq!(choice.alternative_windows[0].start, d("2025-06-02"));
    assert!(choice.detail.contains("misses B"));
    assert!(choice.detail.contains("misses C"));
}

#[test]
fn comparable_rule_ignores_windows_beyond_margin() {
    // Jun 1-2 suits both; the 50% runners-up are blocked by B.
    let responses = || {
        vec![
            resp("a", span("2025-06-01", "2025-06-04")),
            resp("b", span("2025-06-01", "2025-06-02")),
        ]
    };

    let fx = Fixture::new("2025-06-01", "2025-06-04", 2, responses());
    assert_eq!(fx.priorities(), vec![1, 4, 6, 9]);

    let wide = Fixture::with_config(
        "2025-06-01",
        "2025-06-04",
        2,
        responses(),
        EngineConfig {
            comparable_margin: 50,
            ..Default::default()
        },
    );
    assert_eq!(wide.priorities(), vec![1, 4, 6, 8, 9]);
    let choice = wide.tier(8);
    assert_eq!(choice.best_window.as_ref().unwrap().start, d("2025-06-01"));
    assert_eq!(choice.alternative_windows[0].start, d("2025-06-02"));
}

#[test]
fn comparable_rule_pairs_tied_windows_under_zero_margin() {
    let fx = Fixture::with_config(
        "2025-06-01",
        "2025-06-04",
        2,
        vec![
            resp("a", span("2025-06-01", "2025-06-04")),
            resp("b", span("2025-06-02", "2025-06-04")),
            resp("c", vec![d("2025-06-01"), d("2025-06-02"), d("2025-06-04")]),
            resp("d", span("2025-06-01", "2025-06-04")),
        ],
        EngineConfig {
            comparable_margin: 0,
            ..Default::default()
        },
    );
    // All three windows score 75, so a zero margin still pairs the first two.
    assert!(fx.priorities().contains(&8));
}

#[test]
fn tight_range_suggests_widening() {
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-05",
        4,
        vec![resp("a", span("2025-06-01", "2025-06-05"))],
    );
    let tight = fx.tier(7);
    assert!(tight.recommendation_text.contains("1 day"));
    assert!(tight.best_window.is_some());
}

#[test]
fn no_windows_only_null_safe_rules_fire() {
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-03",
        5,
        vec![
            resp("a", span("2025-06-01", "2025-06-03")),
            resp("b", span("2025-06-01", "2025-06-03")),
        ],
    );
    assert!(fx.scored.is_empty());
    assert!(fx.ctx().best_window.is_none());
    assert_eq!(fx.priorities(), vec![4, 7, 9]);

    let shorter = fx.tier(4);
    assert_eq!(shorter.status, Status::Unlikely);
    assert_eq!(shorter.shorter_trip_suggestion.as_ref().unwrap().duration, 3);
    assert_eq!(shorter.best_window.as_ref().unwrap().start, d("2025-06-01"));

    let fallback = fx.tier(9);
    assert!(fallback.best_window.is_none());
    assert!(fallback.detail.contains("No 5-day window"));
}

#[test]
fn fallback_always_matches() {
    let fx = Fixture::new(
        "2025-06-01",
        "2025-06-10",
        3,
        vec![resp("a", vec![d("2025-07-01")])],
    );
    assert!(Rule::KeepExploring.matches(&fx.ctx()));
    let fallback = fx.tier(9);
    assert_eq!(fallback.best_window.as_ref().unwrap().percentage, 0);
    assert_eq!(fallback.alternative_windows.len(), 3);
}

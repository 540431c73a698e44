//! Evaluation cost over a 60-day range with 30 respondents.

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trip_engine::dates::add_days;
use trip_engine::{evaluate, score_all_windows, Plan, Response};

fn fixture() -> (Plan, Vec<Response>) {
    let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let end = add_days(start, 59).unwrap();
    let plan = Plan::new(start, end, 7).unwrap();

    // Each respondent skips a different pair of days so no window is perfect.
    let responses = (0..30)
        .map(|i| {
            let dates = plan
                .dates()
                .into_iter()
                .enumerate()
                .filter(|(day, _)| day % 30 != i && (day + 7) % 30 != i)
                .map(|(_, date)| date);
            Response::new(format!("r{}", i), format!("Person {}", i), dates)
        })
        .collect();
    (plan, responses)
}

fn bench_evaluate(c: &mut Criterion) {
    let (plan, responses) = fixture();

    c.bench_function("score_all_windows 60d x 30", |b| {
        b.iter(|| {
            score_all_windows(
                black_box(plan.start_range),
                black_box(plan.end_range),
                black_box(plan.num_days),
                black_box(&responses),
            )
        })
    });

    c.bench_function("evaluate 60d x 30", |b| {
        b.iter(|| evaluate(black_box(&plan), black_box(&responses)))
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);

//! Tests for calendar-date helpers.

use chrono::NaiveDate;
use trip_engine::dates::{
    add_days, days_between, describe_dates, expand_interval, format_date, format_date_range,
    group_consecutive, parse_date, range_days,
};
use trip_engine::{DateRange, EngineError};

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

// ── Parsing and formatting ──────────────────────────────────────────────────

#[test]
fn parse_and_format_roundtrip_iso_string() {
    let date = d("2025-06-01");
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    assert_eq!(format_date(date), "2025-06-01");
}

#[test]
fn parse_rejects_non_iso_text() {
    let err = parse_date("June 1st").unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));
    assert!(err.to_string().contains("June 1st"));
}

#[test]
fn parse_rejects_datetime_strings() {
    assert!(parse_date("2025-06-01T10:00:00").is_err());
}

// ── Arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn range_days_counts_both_ends() {
    assert_eq!(range_days(d("2025-06-01"), d("2025-06-10")), 10);
    assert_eq!(range_days(d("2025-06-01"), d("2025-06-01")), 1);
}

#[test]
fn days_between_is_signed() {
    assert_eq!(days_between(d("2025-06-10"), d("2025-06-01")), 9);
    assert_eq!(days_between(d("2025-06-01"), d("2025-06-10")), -9);
}

#[test]
fn add_days_handles_leap_day() {
    assert_eq!(add_days(d("2024-02-28"), 1), Some(d("2024-02-29")));
    assert_eq!(add_days(d("2025-02-28"), 1), Some(d("2025-03-01")));
}

#[test]
fn expand_interval_is_inclusive_and_ascending() {
    let dates = expand_interval(d("2025-06-29"), d("2025-07-02"));
    assert_eq!(
        dates,
        vec![
            d("2025-06-29"),
            d("2025-06-30"),
            d("2025-07-01"),
            d("2025-07-02")
        ]
    );
}

// ── Grouping ────────────────────────────────────────────────────────────────

#[test]
fn group_consecutive_sorts_and_dedups() {
    let dates = vec![
        d("2025-06-05"),
        d("2025-06-01"),
        d("2025-06-02"),
        d("2025-06-05"),
        d("2025-06-03"),
        d("2025-06-07"),
    ];
    let runs = group_consecutive(&dates);
    assert_eq!(
        runs,
        vec![
            DateRange::new(d("2025-06-01"), d("2025-06-03")),
            DateRange::new(d("2025-06-05"), d("2025-06-05")),
            DateRange::new(d("2025-06-07"), d("2025-06-07")),
        ]
    );
}

#[test]
fn group_consecutive_spans_month_end() {
    let runs = group_consecutive(&[d("2025-06-30"), d("2025-07-01")]);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].len_days(), 2);
}

#[test]
fn group_consecutive_of_nothing_is_empty() {
    assert!(group_consecutive(&[]).is_empty());
}

// ── Labels ──────────────────────────────────────────────────────────────────

#[test]
fn format_date_range_variants() {
    assert_eq!(format_date_range(d("2025-06-02"), d("2025-06-02")), "Jun 2");
    assert_eq!(format_date_range(d("2025-06-02"), d("2025-06-04")), "Jun 2-4");
    assert_eq!(
        format_date_range(d("2025-06-30"), d("2025-07-02")),
        "Jun 30 - Jul 2"
    );
    assert_eq!(
        format_date_range(d("2025-12-30"), d("2026-01-02")),
        "Dec 30, 2025 - Jan 2, 2026"
    );
}

#[test]
fn describe_dates_joins_runs() {
    let text = describe_dates(&[d("2025-06-06"), d("2025-06-05"), d("2025-06-09")]);
    assert_eq!(text, "Jun 5-6, Jun 9");
}

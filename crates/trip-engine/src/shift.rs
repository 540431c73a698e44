//! Validation of "shift your dates" suggestions.

use chrono::NaiveDate;

use crate::dates::add_days;
use crate::scorer::ShiftDirection;
use crate::windows::Window;

/// The window obtained by moving `original_start` by `shift_days` in `direction`.
///
/// `None` when the move runs off the calendar.
pub fn shifted_window(
    original_start: NaiveDate,
    shift_days: u32,
    direction: ShiftDirection,
    num_days: u32,
) -> Option<Window> {
    let offset = i64::from(shift_days);
    let start = match direction {
        ShiftDirection::Earlier => add_days(original_start, -offset)?,
        ShiftDirection::Later => add_days(original_start, offset)?,
    };
    Window::starting_at(start, num_days)
}

/// Whether the shifted window still lies entirely inside `[plan_start, plan_end]`.
///
/// Boundary-equal starts and ends are inside.
pub fn validate_shifted_window(
    original_start: NaiveDate,
    shift_days: u32,
    direction: ShiftDirection,
    plan_start: NaiveDate,
    plan_end: NaiveDate,
    num_days: u32,
) -> bool {
    shifted_window(original_start, shift_days, direction, num_days)
        .is_some_and(|shifted| shifted.start >= plan_start && shifted.end <= plan_end)
}

//! Weekday-pattern expansion over a closed date range.

use crate::model::weekday_set::WeekdaySet;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Expands `repeat` over the closed interval `[start, end]`.
///
/// - Empty pattern: the singleton `{start}` (`end` is ignored by
///   convention; a one-off has exactly one date).
/// - Otherwise: every date in the range whose weekday is in the pattern.
/// - `end < start`: the empty set, never an error.
pub fn expand(repeat: &WeekdaySet, start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    if repeat.is_empty() {
        dates.insert(start);
        return dates;
    }

    let mut day = start;
    while day <= end {
        if repeat.contains_weekday(day.weekday()) {
            dates.insert(day);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

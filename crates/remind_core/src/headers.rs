//! Human-readable section titles for date buckets.
//!
//! Presentation lists group occurrences under one heading per key; this
//! module renders those headings: `"Remember"` for the sentinel bucket,
//! otherwise month name, ordinal day, optional weekday, the year when it
//! differs from today's, and a Today/Tomorrow/Yesterday prefix for dates
//! within one day of today.

use crate::model::date_key::DateKey;
use crate::model::proximity::day_proximity;
use chrono::{Datelike, NaiveDate};

/// Heading shown for the unscheduled bucket.
pub const SENTINEL_TITLE: &str = "Remember";

/// Renders the list heading for one store key.
pub fn section_title(key: &DateKey, today: NaiveDate, display_weekday: bool) -> String {
    let Some(date) = key.day() else {
        return SENTINEL_TITLE.to_string();
    };

    let mut title = String::new();
    if let Some(proximity) = day_proximity(date, today) {
        title.push_str(proximity.label());
        title.push_str(" - ");
    }
    if display_weekday {
        title.push_str(&date.format("%A").to_string());
        title.push_str(", ");
    }

    let day = date.day();
    title.push_str(&date.format("%B").to_string());
    title.push(' ');
    title.push_str(&day.to_string());
    title.push_str(ordinal_suffix(day));

    if date.year() != today.year() {
        title.push_str(&format!(", {}", date.year()));
    }
    title
}

fn ordinal_suffix(day: u32) -> &'static str {
    // 11th..13th break the last-digit rule.
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

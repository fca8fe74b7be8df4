//! "Is this date near today" classification.
//!
//! Computed from the signed day difference directly. The weekday-based
//! arithmetic this replaces mislabeled dates around month boundaries.

use chrono::NaiveDate;

/// Closeness of a date to the reference "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayProximity {
    Yesterday,
    Today,
    Tomorrow,
}

impl DayProximity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yesterday => "Yesterday",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
        }
    }
}

/// Classifies `date` relative to `today`; `None` when more than one day away.
pub fn day_proximity(date: NaiveDate, today: NaiveDate) -> Option<DayProximity> {
    match date.signed_duration_since(today).num_days() {
        -1 => Some(DayProximity::Yesterday),
        0 => Some(DayProximity::Today),
        1 => Some(DayProximity::Tomorrow),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{day_proximity, DayProximity};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classifies_adjacent_days() {
        let today = date(2024, 3, 10);
        assert_eq!(day_proximity(today, today), Some(DayProximity::Today));
        assert_eq!(
            day_proximity(date(2024, 3, 11), today),
            Some(DayProximity::Tomorrow)
        );
        assert_eq!(
            day_proximity(date(2024, 3, 9), today),
            Some(DayProximity::Yesterday)
        );
        assert_eq!(day_proximity(date(2024, 3, 12), today), None);
    }

    #[test]
    fn handles_month_and_year_boundaries() {
        assert_eq!(
            day_proximity(date(2024, 4, 1), date(2024, 3, 31)),
            Some(DayProximity::Tomorrow)
        );
        assert_eq!(
            day_proximity(date(2023, 12, 31), date(2024, 1, 1)),
            Some(DayProximity::Yesterday)
        );
    }
}

//! Reminder domain model.
//!
//! # Responsibility
//! - Define the canonical reminder record and its schedule variants.
//! - Expand a schedule into the set of store keys it occupies.
//!
//! # Invariants
//! - `id` is stable across edits and never reused for another reminder.
//! - `name` is non-empty after trimming.
//! - `category` indexes the fixed 8-color palette (0..=7).
//! - A weekly schedule carries a non-empty repeat set; a one-off carries
//!   none.

use crate::model::category::CATEGORY_COUNT;
use crate::model::date_key::DateKey;
use crate::model::weekday_set::WeekdaySet;
use crate::recurrence::expand::expand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier carried by every reminder.
///
/// Occurrences are located by this id rather than field-by-field equality,
/// so two reminders with identical fields stay distinct.
pub type ReminderId = Uuid;

/// Where a reminder lives on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Schedule {
    /// Sentinel bucket; no assigned date.
    Unscheduled,
    /// Single occurrence on one date.
    Once { date: NaiveDate },
    /// Repeats on the given weekdays within the closed range `[start, end]`.
    Weekly {
        repeat: WeekdaySet,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl Schedule {
    /// Expands this schedule into the full set of store keys it covers.
    ///
    /// An inverted weekly range covers nothing; that is a caller-facing
    /// warning concern, not an error here.
    pub fn occurrences(&self) -> BTreeSet<DateKey> {
        match self {
            Self::Unscheduled => BTreeSet::from([DateKey::Unscheduled]),
            Self::Once { date } => BTreeSet::from([DateKey::Day(*date)]),
            Self::Weekly { repeat, start, end } => expand(repeat, *start, *end)
                .into_iter()
                .map(DateKey::Day)
                .collect(),
        }
    }

    pub fn is_weekly(&self) -> bool {
        matches!(self, Self::Weekly { .. })
    }
}

/// Validation failures for reminder construction and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Category index falls outside the fixed palette.
    CategoryOutOfRange(u8),
    /// Weekly schedule with an empty repeat set; use `Once` instead.
    EmptyRepeatSet,
    /// A repeat pattern was combined with the unscheduled bucket.
    RepeatRequiresDate,
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "reminder name cannot be empty"),
            Self::CategoryOutOfRange(category) => write!(
                f,
                "category {category} is outside the palette (0..={})",
                CATEGORY_COUNT - 1
            ),
            Self::EmptyRepeatSet => {
                write!(f, "weekly schedule requires at least one repeat weekday")
            }
            Self::RepeatRequiresDate => {
                write!(f, "repeating reminders cannot live in the unscheduled bucket")
            }
        }
    }
}

impl Error for ReminderValidationError {}

/// Canonical reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable global id; survives edits.
    pub id: ReminderId,
    /// Display name, non-empty after trimming.
    pub name: String,
    /// Index into the fixed palette; acts as a visibility filter only.
    pub category: u8,
    pub schedule: Schedule,
}

impl Reminder {
    /// Creates a reminder with a freshly generated id.
    pub fn new(name: impl Into<String>, category: u8, schedule: Schedule) -> Self {
        Self::with_id(Uuid::new_v4(), name, category, schedule)
    }

    /// Creates a reminder with a caller-provided id (edits keep the old id).
    pub fn with_id(
        id: ReminderId,
        name: impl Into<String>,
        category: u8,
        schedule: Schedule,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            schedule,
        }
    }

    /// Checks construction invariants. Write paths must call this before
    /// any store mutation.
    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        if self.name.trim().is_empty() {
            return Err(ReminderValidationError::EmptyName);
        }
        if self.category >= CATEGORY_COUNT {
            return Err(ReminderValidationError::CategoryOutOfRange(self.category));
        }
        if let Schedule::Weekly { repeat, .. } = &self.schedule {
            if repeat.is_empty() {
                return Err(ReminderValidationError::EmptyRepeatSet);
            }
        }
        Ok(())
    }

    /// Store keys this reminder should occupy when freshly materialized.
    pub fn occurrences(&self) -> BTreeSet<DateKey> {
        self.schedule.occurrences()
    }
}

#[cfg(test)]
mod tests {
    use super::{Reminder, ReminderValidationError, Schedule};
    use crate::model::date_key::DateKey;
    use crate::model::weekday_set::WeekdaySet;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_rejects_blank_name_and_bad_category() {
        let blank = Reminder::new("   ", 0, Schedule::Unscheduled);
        assert_eq!(blank.validate(), Err(ReminderValidationError::EmptyName));

        let bad_category = Reminder::new("Dentist", 8, Schedule::Unscheduled);
        assert_eq!(
            bad_category.validate(),
            Err(ReminderValidationError::CategoryOutOfRange(8))
        );
    }

    #[test]
    fn validate_rejects_weekly_without_repeat_days() {
        let reminder = Reminder::new(
            "Gym",
            1,
            Schedule::Weekly {
                repeat: WeekdaySet::EMPTY,
                start: date(2024, 3, 4),
                end: date(2024, 3, 15),
            },
        );
        assert_eq!(
            reminder.validate(),
            Err(ReminderValidationError::EmptyRepeatSet)
        );
    }

    #[test]
    fn occurrences_cover_schedule_shapes() {
        let someday = Reminder::new("Read", 0, Schedule::Unscheduled);
        assert_eq!(
            someday.occurrences().into_iter().collect::<Vec<_>>(),
            vec![DateKey::Unscheduled]
        );

        let once = Reminder::new(
            "Dentist",
            1,
            Schedule::Once {
                date: date(2024, 3, 10),
            },
        );
        assert_eq!(
            once.occurrences().into_iter().collect::<Vec<_>>(),
            vec![DateKey::Day(date(2024, 3, 10))]
        );
    }

    #[test]
    fn edited_reminder_keeps_its_id() {
        let original = Reminder::new("Gym", 1, Schedule::Unscheduled);
        let edited = Reminder::with_id(
            original.id,
            "Gym (evening)",
            2,
            Schedule::Once {
                date: date(2024, 3, 10),
            },
        );
        assert_eq!(edited.id, original.id);
        assert_ne!(edited, original);
    }
}

//! Weekday-subset repeat patterns.
//!
//! # Invariants
//! - Days are numbered 0=Monday..6=Sunday, matching
//!   `chrono::Weekday::num_days_from_monday`.
//! - The serialized form is an ordered list of integers 0..=6.

use chrono::Weekday;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of days addressable by a repeat pattern.
pub const WEEKDAY_COUNT: u8 = 7;

/// Set of weekdays a reminder repeats on. Empty means "does not repeat".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

/// Rejected day index outside 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWeekday(pub u8);

impl Display for InvalidWeekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid weekday index {}; expected 0..=6", self.0)
    }
}

impl Error for InvalidWeekday {}

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    /// Builds a set from day indices, rejecting values outside 0..=6.
    ///
    /// Duplicate days are allowed in the input and collapse into one bit.
    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Result<Self, InvalidWeekday> {
        let mut set = Self::EMPTY;
        for day in days {
            set.insert(day)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: u8) -> Result<(), InvalidWeekday> {
        if day >= WEEKDAY_COUNT {
            return Err(InvalidWeekday(day));
        }
        self.0 |= 1 << day;
        Ok(())
    }

    pub fn contains(&self, day: u8) -> bool {
        day < WEEKDAY_COUNT && self.0 & (1 << day) != 0
    }

    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        self.contains(weekday.num_days_from_monday() as u8)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates member days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        (0..WEEKDAY_COUNT).filter(move |day| self.contains(*day))
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.days())
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Vec::<u8>::deserialize(deserializer)?;
        Self::from_days(days).map_err(DeError::custom)
    }
}

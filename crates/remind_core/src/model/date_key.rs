//! Store keys: a calendar date or the "unscheduled" sentinel bucket.
//!
//! # Invariants
//! - `Unscheduled` orders before every `Day` key, so a sorted key walk
//!   always yields the sentinel bucket first.
//! - The serialized form is `"unscheduled"` or ISO `YYYY-MM-DD`, which keeps
//!   persisted keys sortable and unambiguous.

use chrono::NaiveDate;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SENTINEL_ENCODING: &str = "unscheduled";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key addressing one occurrence bucket in the calendar store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateKey {
    /// "Someday" items with no assigned calendar date.
    Unscheduled,
    /// Ordinary calendar date.
    Day(NaiveDate),
}

/// Persisted key text that is neither the sentinel nor an ISO date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateKey(pub String);

impl Display for InvalidDateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date key `{}`; expected `{SENTINEL_ENCODING}` or YYYY-MM-DD",
            self.0
        )
    }
}

impl Error for InvalidDateKey {}

impl DateKey {
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            Self::Unscheduled => None,
            Self::Day(date) => Some(*date),
        }
    }

    /// Parses the persisted key form.
    pub fn decode(raw: &str) -> Result<Self, InvalidDateKey> {
        if raw == SENTINEL_ENCODING {
            return Ok(Self::Unscheduled);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Self::Day)
            .map_err(|_| InvalidDateKey(raw.to_string()))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self::Day(value)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unscheduled => f.write_str(SENTINEL_ENCODING),
            Self::Day(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::decode(&raw).map_err(DeError::custom)
    }
}

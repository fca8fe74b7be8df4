//! Edit reconciliation: diffing an edited reminder against its
//! previously materialized occurrences.
//!
//! # Responsibility
//! - Compute exactly which store keys must drop the old reminder and which
//!   must gain the new one, without a whole-store rebuild.
//! - Never lose the occurrence the user is actively editing.
//!
//! # Invariants
//! - `to_unlink` and `to_link` are disjoint.
//! - `anchor_new` always ends up linked (directly or carried), even when
//!   its weekday lies outside the new repeat pattern.

use crate::model::date_key::DateKey;
use crate::model::reminder::Reminder;
use std::collections::BTreeSet;

/// Minimal mutation plan for applying one edit to the calendar store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    /// Keys that must drop the old reminder.
    pub to_unlink: BTreeSet<DateKey>,
    /// Keys that must gain the new reminder value.
    pub to_link: BTreeSet<DateKey>,
    /// Keys covered by both schedules; the stored value is swapped from the
    /// old reminder to the new one in place.
    pub carried: BTreeSet<DateKey>,
    /// Degenerate fast path: one-off edited in place at the same key, no
    /// range scan was needed.
    pub in_place: bool,
}

/// Computes the unlink/link delta for editing `old` into `new`.
///
/// `anchor_old` is the key through which the user opened the reminder;
/// `anchor_new` is the key the edit form currently points at. A one-off or
/// unscheduled `old` contributes only `{anchor_old}` as its materialized
/// set, because a manual move can park a one-off at a date its record does
/// not mention.
pub fn reconcile(
    old: &Reminder,
    anchor_old: DateKey,
    new: &Reminder,
    anchor_new: DateKey,
) -> EditDelta {
    // Same one-off, same key: swap the value where it sits.
    if anchor_old == anchor_new && !old.schedule.is_weekly() && !new.schedule.is_weekly() {
        return EditDelta {
            to_unlink: BTreeSet::new(),
            to_link: BTreeSet::new(),
            carried: BTreeSet::from([anchor_new]),
            in_place: true,
        };
    }

    let old_keys: BTreeSet<DateKey> = if old.schedule.is_weekly() {
        old.occurrences()
    } else {
        BTreeSet::from([anchor_old])
    };
    let new_keys = new.occurrences();

    let mut to_unlink: BTreeSet<DateKey> = old_keys.difference(&new_keys).copied().collect();
    let mut to_link: BTreeSet<DateKey> = new_keys.difference(&old_keys).copied().collect();
    let mut carried: BTreeSet<DateKey> = old_keys.intersection(&new_keys).copied().collect();

    // The key the user just set must keep (or gain) the reminder, even when
    // its weekday is outside the new pattern.
    to_unlink.remove(&anchor_new);
    if !carried.contains(&anchor_new) {
        to_link.insert(anchor_new);
    }

    // Moving the anchor away drops the old key, even if the new pattern
    // would still cover it.
    if anchor_old != anchor_new && old_keys.contains(&anchor_old) {
        carried.remove(&anchor_old);
        to_link.remove(&anchor_old);
        to_unlink.insert(anchor_old);
    }

    debug_assert!(to_unlink.is_disjoint(&to_link));
    debug_assert!(to_unlink.is_disjoint(&carried));

    EditDelta {
        to_unlink,
        to_link,
        carried,
        in_place: false,
    }
}

#[cfg(test)]
mod tests {
    use super::reconcile;
    use crate::model::date_key::DateKey;
    use crate::model::reminder::{Reminder, Schedule};
    use crate::model::weekday_set::WeekdaySet;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::Day(date(y, m, d))
    }

    fn days(spec: &[u32]) -> BTreeSet<DateKey> {
        spec.iter().map(|d| day(2024, 3, *d)).collect()
    }

    fn weekly(name: &str, pattern: &[u8], start: NaiveDate, end: NaiveDate) -> Reminder {
        Reminder::new(
            name,
            1,
            Schedule::Weekly {
                repeat: WeekdaySet::from_days(pattern.iter().copied()).unwrap(),
                start,
                end,
            },
        )
    }

    #[test]
    fn one_off_edit_at_same_key_takes_fast_path() {
        let old = Reminder::new(
            "Dentist",
            1,
            Schedule::Once {
                date: date(2024, 3, 10),
            },
        );
        let new = Reminder::with_id(
            old.id,
            "Dentist (moved rooms)",
            2,
            Schedule::Once {
                date: date(2024, 3, 10),
            },
        );

        let delta = reconcile(&old, day(2024, 3, 10), &new, day(2024, 3, 10));
        assert!(delta.in_place);
        assert!(delta.to_unlink.is_empty());
        assert!(delta.to_link.is_empty());
        assert_eq!(delta.carried, days(&[10]));
    }

    #[test]
    fn pattern_change_with_moved_anchor_diffs_exactly() {
        // Mon/Wed/Fri 2024-03-04..15 edited to Tue/Thu, anchor 06 -> 05.
        let old = weekly("Gym", &[0, 2, 4], date(2024, 3, 4), date(2024, 3, 15));
        let new = Reminder::with_id(
            old.id,
            "Gym",
            1,
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([1, 3]).unwrap(),
                start: date(2024, 3, 4),
                end: date(2024, 3, 15),
            },
        );

        let delta = reconcile(&old, day(2024, 3, 6), &new, day(2024, 3, 5));
        assert_eq!(delta.to_unlink, days(&[4, 6, 8, 11, 13, 15]));
        assert_eq!(delta.to_link, days(&[5, 7, 12, 14]));
        assert!(delta.carried.is_empty());
        assert!(!delta.in_place);
    }

    #[test]
    fn anchor_outside_new_pattern_is_force_linked() {
        // New pattern is Tuesdays only; the user pinned a Friday.
        let old = weekly("Gym", &[0], date(2024, 3, 4), date(2024, 3, 15));
        let new = Reminder::with_id(
            old.id,
            "Gym",
            1,
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([1]).unwrap(),
                start: date(2024, 3, 4),
                end: date(2024, 3, 15),
            },
        );

        let anchor_new = day(2024, 3, 8);
        let delta = reconcile(&old, day(2024, 3, 4), &new, anchor_new);
        assert!(delta.to_link.contains(&anchor_new));
        assert!(!delta.to_unlink.contains(&anchor_new));
    }

    #[test]
    fn moved_anchor_is_unlinked_even_when_new_pattern_covers_it() {
        // Pattern unchanged; only the anchor moves 04 -> 11. The old Monday
        // must be dropped although Mondays are still in the pattern.
        let old = weekly("Gym", &[0], date(2024, 3, 4), date(2024, 3, 15));
        let new = Reminder::with_id(old.id, "Gym", 1, old.schedule.clone());

        let delta = reconcile(&old, day(2024, 3, 4), &new, day(2024, 3, 11));
        assert!(delta.to_unlink.contains(&day(2024, 3, 4)));
        assert!(!delta.carried.contains(&day(2024, 3, 4)));
        assert!(delta.carried.contains(&day(2024, 3, 11)));
    }

    #[test]
    fn unscheduled_to_weekly_goes_through_the_same_diff() {
        let old = Reminder::new("Read paper", 0, Schedule::Unscheduled);
        let new = Reminder::with_id(
            old.id,
            "Read paper",
            0,
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([1, 3]).unwrap(),
                start: date(2024, 3, 5),
                end: date(2024, 3, 14),
            },
        );

        let delta = reconcile(&old, DateKey::Unscheduled, &new, day(2024, 3, 5));
        assert_eq!(
            delta.to_unlink,
            BTreeSet::from([DateKey::Unscheduled])
        );
        assert_eq!(delta.to_link, days(&[5, 7, 12, 14]));
    }

    #[test]
    fn weekly_to_unscheduled_unlinks_the_whole_expansion() {
        let old = weekly("Gym", &[0, 2, 4], date(2024, 3, 4), date(2024, 3, 15));
        let new = Reminder::with_id(old.id, "Gym", 1, Schedule::Unscheduled);

        let delta = reconcile(&old, day(2024, 3, 6), &new, DateKey::Unscheduled);
        assert_eq!(delta.to_unlink, days(&[4, 6, 8, 11, 13, 15]));
        assert_eq!(
            delta.to_link,
            BTreeSet::from([DateKey::Unscheduled])
        );
    }

    #[test]
    fn unchanged_expansion_is_fully_carried() {
        let old = weekly("Gym", &[0, 2, 4], date(2024, 3, 4), date(2024, 3, 15));
        let new = Reminder::with_id(old.id, "Gym (new coach)", 3, old.schedule.clone());

        let delta = reconcile(&old, day(2024, 3, 6), &new, day(2024, 3, 6));
        assert!(delta.to_unlink.is_empty());
        assert!(delta.to_link.is_empty());
        assert_eq!(delta.carried, days(&[4, 6, 8, 11, 13, 15]));
        assert!(!delta.in_place);
    }

    #[test]
    fn moved_one_off_reconciles_from_its_anchor_not_its_record() {
        // The record says 2024-03-10, but a manual move parked it on 03-12.
        let old = Reminder::new(
            "Dentist",
            1,
            Schedule::Once {
                date: date(2024, 3, 10),
            },
        );
        let new = Reminder::with_id(
            old.id,
            "Dentist",
            1,
            Schedule::Once {
                date: date(2024, 3, 20),
            },
        );

        let delta = reconcile(&old, day(2024, 3, 12), &new, day(2024, 3, 20));
        assert_eq!(delta.to_unlink, days(&[12]));
        assert_eq!(delta.to_link, days(&[20]));
    }
}

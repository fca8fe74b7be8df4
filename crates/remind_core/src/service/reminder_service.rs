//! Reminder use-case façade.
//!
//! # Responsibility
//! - Provide add/edit/delete/move/query APIs over the calendar store.
//! - Keep the store consistent and persisted after every mutation.
//!
//! # Invariants
//! - Every mutation is applied to a scratch copy, persisted, and only then
//!   swapped in; a persistence failure leaves the in-memory store untouched.
//! - Validation failures reject the operation before any mutation.
//! - Queries honor the caller-supplied category-visibility mask.

use crate::model::category::CategoryMask;
use crate::model::date_key::DateKey;
use crate::model::reminder::{Reminder, ReminderId, ReminderValidationError, Schedule};
use crate::model::weekday_set::WeekdaySet;
use crate::recurrence::reconcile::reconcile;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::store::calendar_store::CalendarStore;
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied field values for an add or edit.
///
/// `anchor` is the date picked in the form (or the sentinel for "someday"
/// items); `end` bounds a weekly schedule and defaults to the anchor day.
#[derive(Debug, Clone)]
pub struct ReminderDraft {
    pub name: String,
    pub category: u8,
    pub repeat: WeekdaySet,
    pub anchor: DateKey,
    pub end: Option<NaiveDate>,
}

impl ReminderDraft {
    pub fn one_off(name: impl Into<String>, category: u8, anchor: DateKey) -> Self {
        Self {
            name: name.into(),
            category,
            repeat: WeekdaySet::EMPTY,
            anchor,
            end: None,
        }
    }

    pub fn weekly(
        name: impl Into<String>,
        category: u8,
        repeat: WeekdaySet,
        anchor: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            repeat,
            anchor: DateKey::Day(anchor),
            end: Some(end),
        }
    }
}

/// Service error for reminder use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Rejected before any mutation; the store is untouched.
    Validation(ReminderValidationError),
    /// No occurrence with the given id at the given key.
    OccurrenceNotFound { key: DateKey, id: ReminderId },
    /// Persistence failure; the mutation was rolled back.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::OccurrenceNotFound { key, id } => {
                write!(f, "no occurrence of reminder {id} at {key}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::OccurrenceNotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ReminderValidationError> for ServiceError {
    fn from(value: ReminderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Façade combining expansion, reconciliation, the store and persistence.
pub struct ReminderService<R: SnapshotRepository> {
    repo: R,
    store: CalendarStore,
}

impl<R: SnapshotRepository> ReminderService<R> {
    /// Loads the persisted calendar (or starts empty) behind the service.
    pub fn load(repo: R) -> Result<Self, ServiceError> {
        let store = repo.load_calendar()?.unwrap_or_default();
        Ok(Self { repo, store })
    }

    /// Creates a reminder from the draft and links every occurrence.
    ///
    /// A weekly draft whose anchor weekday is outside its own pattern gets
    /// no occurrence on the anchor day; anchor forcing applies to edits
    /// only.
    pub fn add(&mut self, draft: ReminderDraft) -> Result<Reminder, ServiceError> {
        let schedule = draft_schedule(&draft, None)?;
        let reminder = Reminder::new(draft.name, draft.category, schedule);
        reminder.validate()?;

        let mut next = self.store.clone();
        for key in reminder.occurrences() {
            next.link(key, reminder.clone());
        }
        self.commit(next, "reminder_add", reminder.id)?;
        Ok(reminder)
    }

    /// Edits the reminder occupying `anchor_old` with id `old_id`.
    ///
    /// The new value keeps the old id. Reconciliation guarantees the new
    /// anchor key ends up holding the edited reminder, and that moving the
    /// anchor off a date removes it there even when the new pattern still
    /// covers that date.
    pub fn edit(
        &mut self,
        anchor_old: DateKey,
        old_id: ReminderId,
        draft: ReminderDraft,
    ) -> Result<Reminder, ServiceError> {
        let old = self
            .store
            .find(&anchor_old, old_id)
            .cloned()
            .ok_or(ServiceError::OccurrenceNotFound {
                key: anchor_old,
                id: old_id,
            })?;

        let anchor_new = draft.anchor;
        let schedule = draft_schedule(&draft, Some(&old.schedule))?;
        let new = Reminder::with_id(old.id, draft.name, draft.category, schedule);
        new.validate()?;

        let delta = reconcile(&old, anchor_old, &new, anchor_new);
        let mut next = self.store.clone();
        next.apply_edit(&delta, old.id, &new);
        self.commit(next, "reminder_edit", new.id)?;
        Ok(new)
    }

    /// Unlinks one occurrence; the date key disappears when its list
    /// becomes empty.
    pub fn delete_occurrence(
        &mut self,
        key: DateKey,
        id: ReminderId,
    ) -> Result<(), ServiceError> {
        let mut next = self.store.clone();
        if next.unlink(&key, id).is_none() {
            return Err(ServiceError::OccurrenceNotFound { key, id });
        }
        self.commit(next, "reminder_delete_one", id)
    }

    /// Unlinks every occurrence of the reminder, including any parked at an
    /// irregular date by a manual move.
    pub fn delete_all_occurrences(&mut self, id: ReminderId) -> Result<usize, ServiceError> {
        let mut next = self.store.clone();
        let removed = next.unlink_everywhere(id);
        if removed == 0 {
            return Ok(0);
        }
        self.commit(next, "reminder_delete_all", id)?;
        Ok(removed)
    }

    /// Moves one occurrence across keys, inserting at `position` (or
    /// appending) in the target bucket. Used for manual reordering.
    pub fn move_occurrence(
        &mut self,
        from: DateKey,
        to: DateKey,
        id: ReminderId,
        position: Option<usize>,
    ) -> Result<(), ServiceError> {
        let mut next = self.store.clone();
        let reminder = next
            .unlink(&from, id)
            .ok_or(ServiceError::OccurrenceNotFound { key: from, id })?;
        next.insert_at(to, position, reminder);
        self.commit(next, "reminder_move", id)
    }

    /// Occurrences at `key` whose category the mask shows, in bucket order.
    pub fn occurrences_on(&self, key: &DateKey, mask: &CategoryMask) -> Vec<&Reminder> {
        self.store
            .occurrences(key)
            .iter()
            .filter(|reminder| mask.is_visible(reminder.category))
            .collect()
    }

    /// Keys holding at least one visible occurrence, sentinel first.
    pub fn visible_keys(&self, mask: &CategoryMask) -> Vec<DateKey> {
        self.store
            .keys()
            .filter(|key| !self.occurrences_on(key, mask).is_empty())
            .copied()
            .collect()
    }

    /// Lookup used by presentation to prefill an edit form.
    pub fn reminder_at(&self, key: &DateKey, id: ReminderId) -> Option<&Reminder> {
        self.store.find(key, id)
    }

    fn commit(
        &mut self,
        next: CalendarStore,
        event: &str,
        id: ReminderId,
    ) -> Result<(), ServiceError> {
        match self.repo.save_calendar(&next) {
            Ok(()) => {
                info!(
                    "event={event} module=service status=ok id={id} buckets={}",
                    next.bucket_count()
                );
                self.store = next;
                Ok(())
            }
            Err(err) => {
                error!("event={event} module=service status=error id={id} error={err}");
                Err(err.into())
            }
        }
    }
}

/// Builds the schedule a draft describes.
///
/// For edits of weekly schedules the range start carries over from the old
/// scheduled start, so extending or re-patterning a series does not silently
/// re-base it; an old unscheduled reminder starts its range at the new
/// anchor day.
fn draft_schedule(
    draft: &ReminderDraft,
    old: Option<&Schedule>,
) -> Result<Schedule, ServiceError> {
    match (draft.anchor, draft.repeat.is_empty()) {
        (DateKey::Unscheduled, true) => Ok(Schedule::Unscheduled),
        (DateKey::Unscheduled, false) => Err(ReminderValidationError::RepeatRequiresDate.into()),
        (DateKey::Day(date), true) => Ok(Schedule::Once { date }),
        (DateKey::Day(date), false) => {
            let start = match old {
                Some(Schedule::Weekly { start, .. }) => *start,
                Some(Schedule::Once { date: old_date }) => *old_date,
                Some(Schedule::Unscheduled) | None => date,
            };
            Ok(Schedule::Weekly {
                repeat: draft.repeat,
                start,
                end: draft.end.unwrap_or(date),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{draft_schedule, ReminderDraft, ServiceError};
    use crate::model::date_key::DateKey;
    use crate::model::reminder::{ReminderValidationError, Schedule};
    use crate::model::weekday_set::WeekdaySet;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn weekly_draft_with_unscheduled_anchor_is_rejected() {
        let draft = ReminderDraft {
            name: "Gym".to_string(),
            category: 1,
            repeat: WeekdaySet::from_days([0]).unwrap(),
            anchor: DateKey::Unscheduled,
            end: None,
        };
        assert!(matches!(
            draft_schedule(&draft, None),
            Err(ServiceError::Validation(
                ReminderValidationError::RepeatRequiresDate
            ))
        ));
    }

    #[test]
    fn weekly_edit_carries_the_old_scheduled_start() {
        let draft = ReminderDraft::weekly(
            "Gym",
            1,
            WeekdaySet::from_days([1, 3]).unwrap(),
            date(10),
            date(20),
        );

        let old = Schedule::Weekly {
            repeat: WeekdaySet::from_days([0]).unwrap(),
            start: date(4),
            end: date(15),
        };
        assert_eq!(
            draft_schedule(&draft, Some(&old)).unwrap(),
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([1, 3]).unwrap(),
                start: date(4),
                end: date(20),
            }
        );

        // Old unscheduled reminders base the range at the new anchor day.
        assert_eq!(
            draft_schedule(&draft, Some(&Schedule::Unscheduled)).unwrap(),
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([1, 3]).unwrap(),
                start: date(10),
                end: date(20),
            }
        );
    }

    #[test]
    fn weekly_draft_without_end_defaults_to_the_anchor_day() {
        let draft = ReminderDraft {
            name: "Gym".to_string(),
            category: 1,
            repeat: WeekdaySet::from_days([0]).unwrap(),
            anchor: DateKey::Day(date(4)),
            end: None,
        };
        assert_eq!(
            draft_schedule(&draft, None).unwrap(),
            Schedule::Weekly {
                repeat: WeekdaySet::from_days([0]).unwrap(),
                start: date(4),
                end: date(4),
            }
        );
    }
}

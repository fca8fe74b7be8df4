//! In-memory calendar store: the durable source of truth for occurrences.
//!
//! # Invariants
//! - No key ever maps to an empty list; emptied buckets are removed at once.
//! - Key iteration order is sentinel-first, then ascending dates
//!   (`DateKey`'s total order).
//! - No bucket holds two occurrences with the same reminder id.

use crate::model::date_key::DateKey;
use crate::model::reminder::{Reminder, ReminderId};
use crate::recurrence::reconcile::EditDelta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from date-or-sentinel key to its ordered occurrence list.
///
/// A reminder repeating on N dates is referenced from N buckets; the
/// entries carry the same id and the same field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarStore {
    entries: BTreeMap<DateKey, Vec<Reminder>>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.entries.len()
    }

    /// Keys in store order: sentinel first, then dates ascending.
    pub fn keys(&self) -> impl Iterator<Item = &DateKey> {
        self.entries.keys()
    }

    /// Occurrences at `key`, in insertion order. Empty slice when absent.
    pub fn occurrences(&self, key: &DateKey) -> &[Reminder] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    pub fn find(&self, key: &DateKey, id: ReminderId) -> Option<&Reminder> {
        self.entries
            .get(key)?
            .iter()
            .find(|reminder| reminder.id == id)
    }

    /// Appends an occurrence at `key`.
    ///
    /// Returns `false` without mutating when an occurrence with the same id
    /// is already present, so repeated links can never duplicate.
    pub fn link(&mut self, key: DateKey, reminder: Reminder) -> bool {
        self.insert_at(key, None, reminder)
    }

    /// Inserts an occurrence at `position` within the bucket (clamped to the
    /// bucket length), or appends when `position` is `None`.
    pub fn insert_at(
        &mut self,
        key: DateKey,
        position: Option<usize>,
        reminder: Reminder,
    ) -> bool {
        let bucket = self.entries.entry(key).or_default();
        if bucket.iter().any(|existing| existing.id == reminder.id) {
            return false;
        }
        match position {
            Some(index) => bucket.insert(index.min(bucket.len()), reminder),
            None => bucket.push(reminder),
        }
        true
    }

    /// Removes the occurrence with `id` from `key`, dropping the bucket if
    /// it becomes empty. Returns the removed value.
    pub fn unlink(&mut self, key: &DateKey, id: ReminderId) -> Option<Reminder> {
        let bucket = self.entries.get_mut(key)?;
        let index = bucket.iter().position(|reminder| reminder.id == id)?;
        let removed = bucket.remove(index);
        if bucket.is_empty() {
            self.entries.remove(key);
        }
        Some(removed)
    }

    /// Swaps the occurrence with `old_id` at `key` for `new`, preserving its
    /// position in the bucket. Returns `false` when `old_id` is absent.
    pub fn replace(&mut self, key: &DateKey, old_id: ReminderId, new: Reminder) -> bool {
        let Some(bucket) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(slot) = bucket.iter_mut().find(|reminder| reminder.id == old_id) else {
            return false;
        };
        *slot = new;
        true
    }

    /// Removes every occurrence of `id` across all buckets, dropping
    /// emptied buckets. Returns the number of occurrences removed.
    pub fn unlink_everywhere(&mut self, id: ReminderId) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|reminder| reminder.id != id);
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        removed
    }

    /// Applies a reconciliation delta: the old id leaves `to_unlink`, and
    /// every link/carried key ends up holding the new value exactly once.
    pub fn apply_edit(&mut self, delta: &EditDelta, old_id: ReminderId, new: &Reminder) {
        for key in &delta.to_unlink {
            self.unlink(key, old_id);
        }
        for key in &delta.carried {
            if !self.replace(key, old_id, new.clone()) {
                self.link(*key, new.clone());
            }
        }
        for key in &delta.to_link {
            self.unlink(key, old_id);
            self.link(*key, new.clone());
        }
    }
}

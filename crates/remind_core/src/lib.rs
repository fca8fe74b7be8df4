//! Core engine for the Remind calendar store.
//! This crate is the single source of truth for occurrence invariants.

pub mod db;
pub mod headers;
pub mod logging;
pub mod model;
pub mod recurrence;
pub mod repo;
pub mod service;
pub mod store;

pub use headers::{section_title, SENTINEL_TITLE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{CategoryMask, CATEGORY_COUNT};
pub use model::date_key::DateKey;
pub use model::proximity::{day_proximity, DayProximity};
pub use model::reminder::{Reminder, ReminderId, ReminderValidationError, Schedule};
pub use model::weekday_set::WeekdaySet;
pub use recurrence::expand::expand;
pub use recurrence::reconcile::{reconcile, EditDelta};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, CALENDAR_SNAPSHOT,
};
pub use service::reminder_service::{ReminderDraft, ReminderService, ServiceError};
pub use store::calendar_store::CalendarStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

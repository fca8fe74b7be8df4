//! Snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the whole calendar store as one named durable record.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `save_calendar` replaces the record atomically (single upsert).
//! - `load_calendar` validates the persisted payload and surfaces
//!   corruption as `InvalidData` instead of returning a partial store.

use crate::db::DbError;
use crate::store::calendar_store::CalendarStore;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record name under which the calendar mapping is stored.
pub const CALENDAR_SNAPSHOT: &str = "calendar";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encoding(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "snapshot encoding failed: {err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted snapshot data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable-record contract the reminder service persists through.
pub trait SnapshotRepository {
    /// Loads the calendar record; `None` when nothing was ever saved.
    fn load_calendar(&self) -> RepoResult<Option<CalendarStore>>;
    /// Replaces the calendar record with the given store state.
    fn save_calendar(&self, store: &CalendarStore) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `snapshots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_calendar(&self) -> RepoResult<Option<CalendarStore>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE name = ?1;",
                [CALENDAR_SNAPSHOT],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        let store: CalendarStore = serde_json::from_str(&payload).map_err(|err| {
            RepoError::InvalidData(format!(
                "calendar snapshot payload does not parse: {err}"
            ))
        })?;

        info!(
            "event=snapshot_load module=repo status=ok buckets={}",
            store.bucket_count()
        );
        Ok(Some(store))
    }

    fn save_calendar(&self, store: &CalendarStore) -> RepoResult<()> {
        let payload = serde_json::to_string(store).map_err(RepoError::Encoding)?;

        self.conn.execute(
            "INSERT INTO snapshots (name, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![CALENDAR_SNAPSHOT, payload],
        )?;

        info!(
            "event=snapshot_save module=repo status=ok buckets={}",
            store.bucket_count()
        );
        Ok(())
    }
}

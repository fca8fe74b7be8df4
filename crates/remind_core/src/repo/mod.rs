//! Persistence layer for the calendar store.
//!
//! # Responsibility
//! - Define the durable-record contract the service persists through.
//! - Isolate SQLite and payload-encoding details from the engine.
//!
//! # Invariants
//! - Read paths reject corrupt persisted payloads instead of masking them.

pub mod snapshot_repo;

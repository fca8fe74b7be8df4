//! Date-indexed occurrence storage.
//!
//! # Responsibility
//! - Hold the in-memory mapping from store key to occurrence list.
//! - Enforce the no-empty-bucket and no-duplicate-id invariants on every
//!   mutation.

pub mod calendar_store;

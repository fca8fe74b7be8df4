//! Recurrence expansion and edit reconciliation.
//!
//! # Responsibility
//! - Expand a weekday pattern over a date range into concrete dates.
//! - Diff an edited reminder against its previously materialized
//!   occurrences into a minimal unlink/link delta.
//!
//! # Invariants
//! - Both algorithms are pure; only the store apply step mutates state.
//! - A delta's unlink and link sets never overlap.

pub mod expand;
pub mod reconcile;

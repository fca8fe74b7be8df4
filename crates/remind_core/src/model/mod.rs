//! Domain model for the reminder calendar store.
//!
//! # Responsibility
//! - Define the canonical reminder record and its schedule shapes.
//! - Define the date-or-sentinel store key and its total order.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.
//! - The sentinel ("unscheduled") key orders before every calendar date.

pub mod category;
pub mod date_key;
pub mod proximity;
pub mod reminder;
pub mod weekday_set;

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate expansion, reconciliation, store mutation and persistence
//!   into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod reminder_service;

//! BMI domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep pure BMI computation separate from storage concerns.
//!
//! # Invariants
//! - Every history entry is identified by a store-assigned `EntryId`.
//! - Entries are immutable; there is no update or delete representation.

pub mod bmi;
pub mod measurement;

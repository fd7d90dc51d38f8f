//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the append-only history store contract.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewEntry::validate()` before
//!   persistence.
//! - Repository APIs expose no mutation of existing rows.

pub mod entry_repo;

//! Core domain logic for the BMI tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bmi::{compute_bmi, Category, IMPERIAL_BMI_FACTOR};
pub use model::measurement::{
    EntryId, EntryValidationError, InputError, InputErrorKind, InputField, Measurement,
    MeasurementInput, NewEntry,
};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use service::tracker_service::{ServiceError, TrackerService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

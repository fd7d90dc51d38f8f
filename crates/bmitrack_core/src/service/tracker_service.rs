//! Measurement recording use-case service.
//!
//! # Responsibility
//! - Gate raw UI input, compute BMI, and append through the repository.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - The store is never invoked for input that fails the gate; a rejected
//!   submit leaves the history untouched.
//! - Callers receive the confirmed record from the store, never an
//!   optimistic copy; the display mirror is appended only from that value.
//! - Store failures are logged here at the boundary and returned, never
//!   panicked.

use crate::model::measurement::{InputError, Measurement, MeasurementInput, NewEntry};
use crate::repo::entry_repo::{EntryRepository, RepoError};
use chrono::Local;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced by the recording use case.
#[derive(Debug)]
pub enum ServiceError {
    /// Raw input rejected before any store interaction.
    Input(InputError),
    /// Store interaction failed after input passed the gate.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<InputError> for ServiceError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for recording and reading BMI history.
pub struct TrackerService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> TrackerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a measurement from the two raw UI text fields.
    ///
    /// # Contract
    /// - Captures the local calendar date at creation time.
    /// - Computes BMI at full precision; no rounding before persistence.
    /// - Returns the store-confirmed `Measurement` with its assigned id
    ///   and derived category.
    pub fn record(&self, weight_text: &str, height_text: &str) -> Result<Measurement, ServiceError> {
        self.record_on(&today_date_string(), weight_text, height_text)
    }

    /// Records a measurement for an explicit calendar date string.
    ///
    /// Exists so callers with their own clock (and tests) can pin the
    /// date; `record` is the wall-clock entry point.
    pub fn record_on(
        &self,
        date: &str,
        weight_text: &str,
        height_text: &str,
    ) -> Result<Measurement, ServiceError> {
        let input = MeasurementInput::parse(weight_text, height_text)?;
        let entry = NewEntry::from_input(date, &input);

        match self.repo.append(&entry) {
            Ok(measurement) => {
                info!(
                    "event=entry_append module=service status=ok id={} bmi={:.4} category={}",
                    measurement.id,
                    measurement.bmi,
                    measurement.category.as_str()
                );
                Ok(measurement)
            }
            Err(err) => {
                error!(
                    "event=entry_append module=service status=error error_code=entry_append_failed error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Returns the full history in insertion order.
    pub fn history(&self) -> Result<Vec<Measurement>, ServiceError> {
        match self.repo.load_all() {
            Ok(entries) => Ok(entries),
            Err(err) => {
                error!(
                    "event=history_load module=service status=error error_code=history_load_failed error={err}"
                );
                Err(err.into())
            }
        }
    }
}

/// Local calendar date in `M/D/YYYY` form, matching the history display.
fn today_date_string() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

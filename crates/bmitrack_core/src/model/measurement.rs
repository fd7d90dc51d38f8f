//! Measurement domain model and raw-input gating.
//!
//! # Responsibility
//! - Define the immutable history record returned by the store.
//! - Gate raw UI text into validated numeric weight/height input.
//!
//! # Invariants
//! - A `Measurement` is never mutated after the store confirms it; no
//!   update or delete path exists at any layer.
//! - `id` values are assigned by the store, unique and strictly
//!   increasing in creation order.
//! - `bmi` holds the full-precision value computed at creation time and
//!   is never re-derived; `category` is a function of that stored `bmi`.

use crate::model::bmi::{compute_bmi, Category};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier for a history entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = i64;

/// One immutable entry in the BMI history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Store-assigned, strictly increasing identifier.
    pub id: EntryId,
    /// Local calendar date captured at creation time.
    pub date: String,
    /// Weight in pounds, as validated at creation.
    pub weight: f64,
    /// Height in inches, as validated at creation.
    pub height: f64,
    /// Full-precision BMI computed once at creation and stored verbatim.
    pub bmi: f64,
    /// Band derived from `bmi`; recomputed on load, never persisted.
    pub category: Category,
}

/// Entry shape handed to the store for appending.
///
/// Everything except the identifier, which the store assigns on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: String,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
}

impl NewEntry {
    /// Builds an entry from validated input, computing the BMI value.
    pub fn from_input(date: impl Into<String>, input: &MeasurementInput) -> Self {
        Self {
            date: date.into(),
            weight: input.weight,
            height: input.height,
            bmi: compute_bmi(input.weight, input.height),
        }
    }

    /// Checks the persistence preconditions for this entry.
    ///
    /// # Invariants
    /// - `weight` and `height` are strictly positive and finite.
    /// - `bmi` is finite (it is a quotient of the two fields above).
    /// - `date` is non-empty.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(EntryValidationError::NonPositiveWeight(self.weight));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(EntryValidationError::NonPositiveHeight(self.height));
        }
        if !self.bmi.is_finite() {
            return Err(EntryValidationError::NonFiniteBmi(self.bmi));
        }
        if self.date.trim().is_empty() {
            return Err(EntryValidationError::EmptyDate);
        }
        Ok(())
    }
}

/// Persistence precondition violations for a [`NewEntry`].
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    NonPositiveWeight(f64),
    NonPositiveHeight(f64),
    NonFiniteBmi(f64),
    EmptyDate,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWeight(value) => {
                write!(f, "weight must be positive and finite, got {value}")
            }
            Self::NonPositiveHeight(value) => {
                write!(f, "height must be positive and finite, got {value}")
            }
            Self::NonFiniteBmi(value) => write!(f, "bmi must be finite, got {value}"),
            Self::EmptyDate => write!(f, "date must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// Which of the two raw UI inputs failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Weight,
    Height,
}

impl InputField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Height => "height",
        }
    }
}

/// Why a raw UI input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    Missing,
    NotNumeric,
    NotPositive,
}

/// Rejection of one raw input field, surfaced so the UI can show a
/// validation message instead of silently dropping the submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputError {
    pub field: InputField,
    pub kind: InputErrorKind,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field.as_str();
        match self.kind {
            InputErrorKind::Missing => write!(f, "{field} is required"),
            InputErrorKind::NotNumeric => write!(f, "{field} must be a number"),
            InputErrorKind::NotPositive => write!(f, "{field} must be greater than zero"),
        }
    }
}

impl Error for InputError {}

/// Validated weight/height pair parsed from the two raw UI text fields.
///
/// The store must never be invoked for input that fails this gate; a
/// rejected submit creates no entry and leaves the history untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementInput {
    /// Weight in pounds, strictly positive and finite.
    pub weight: f64,
    /// Height in inches, strictly positive and finite.
    pub height: f64,
}

impl MeasurementInput {
    /// Parses and gates the two raw text inputs.
    ///
    /// # Contract
    /// - Empty or whitespace-only text is `Missing`.
    /// - Text that does not parse as a finite number is `NotNumeric`.
    /// - Zero or negative values are `NotPositive`.
    /// - Weight is checked before height; the first failure is returned.
    pub fn parse(weight_text: &str, height_text: &str) -> Result<Self, InputError> {
        let weight = parse_field(InputField::Weight, weight_text)?;
        let height = parse_field(InputField::Height, height_text)?;
        Ok(Self { weight, height })
    }
}

fn parse_field(field: InputField, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError {
            field,
            kind: InputErrorKind::Missing,
        });
    }
    let value: f64 = trimmed.parse().map_err(|_| InputError {
        field,
        kind: InputErrorKind::NotNumeric,
    })?;
    if !value.is_finite() {
        return Err(InputError {
            field,
            kind: InputErrorKind::NotNumeric,
        });
    }
    if value <= 0.0 {
        return Err(InputError {
            field,
            kind: InputErrorKind::NotPositive,
        });
    }
    Ok(value)
}

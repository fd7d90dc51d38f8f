//! BMI computation and category classification.
//!
//! # Responsibility
//! - Compute the imperial BMI value from weight and height.
//! - Map a BMI value to its classification band.
//!
//! # Invariants
//! - `compute_bmi` applies no rounding; display rounding is a UI concern.
//! - Band boundaries are closed intervals; classification at the exact
//!   boundary values (18.5, 24.9, 25.0, 29.9, 30.0) is stable.
//! - Both functions are pure: no state, no side effects.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Multiplier converting `lb/in^2` into BMI units.
pub const IMPERIAL_BMI_FACTOR: f64 = 703.0;

/// Computes BMI from weight in pounds and height in inches.
///
/// # Contract
/// - Callers must pass strictly positive, finite values; input gating
///   happens in [`super::measurement::MeasurementInput`].
/// - The returned value is full precision. The store persists it verbatim.
pub fn compute_bmi(weight_lbs: f64, height_in: f64) -> f64 {
    weight_lbs / (height_in * height_in) * IMPERIAL_BMI_FACTOR
}

/// Ordered classification band derived from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// `bmi < 18.5`
    Underweight,
    /// `18.5 <= bmi <= 24.9`
    Healthy,
    /// `24.9 < bmi <= 29.9`
    Overweight,
    /// `bmi > 29.9`
    Obese,
}

impl Category {
    /// Classifies a BMI value into its band.
    ///
    /// Boundary values resolve exactly as documented on each variant.
    /// Values strictly between two listed bands (such as 24.95) belong to
    /// the higher band.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi <= 24.9 {
            Self::Healthy
        } else if bmi <= 29.9 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Stable machine-readable label matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Healthy => "healthy",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        }
    }

    /// Human-readable label for result and history display.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_label())
    }
}

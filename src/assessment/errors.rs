//! assessment::errors — failures of point-in-time growth assessment.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the assessment layer: age
//! calculation, z-score/BMI computation and option construction. Invalid
//! *measurements* discovered by the validator are not errors; they are
//! returned as a [`ValidationReport`](crate::assessment::ValidationReport).
//!
//! Key behaviors
//! -------------
//! - Distinguish domain-range failures by axis: an age outside the reference
//!   tables becomes `UnsupportedAgeRange`, a height outside the
//!   weight-for-height table becomes `UnsupportedHeightRange`.
//! - Wrap any other reference failure (a missing table in a fixture set) as
//!   `Reference`.
//!
//! Conventions
//! -----------
//! - `From<ReferenceError>` performs the axis-aware mapping, so lookups in
//!   this subtree can use `?` directly on `ReferenceStandards` calls.
//!
//! Testing notes
//! -------------
//! - Unit tests check the `OutOfRange` mapping for both axes and that
//!   payloads appear in `Display` output.
use chrono::NaiveDate;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::reference::{Indicator, LookupAxis, ReferenceError, Sex};

pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Error conditions raised while assessing a single measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// The observation date precedes the birth date.
    InvalidDateRange { birth: NaiveDate, observation: NaiveDate },

    /// The age lies outside the reference table for this indicator.
    UnsupportedAgeRange { indicator: Indicator, sex: Sex, age_months: f64, min: f64, max: f64 },

    /// The height lies outside the weight-for-height reference table.
    UnsupportedHeightRange { sex: Sex, height_cm: f64, min: f64, max: f64 },

    /// A measured value is non-finite or not strictly positive.
    InvalidMeasurement { field: &'static str, value: f64 },

    /// Status thresholds violate 0 < warning < alert.
    InvalidThresholds { warning: f64, alert: f64 },

    /// A measurement bound is non-finite or not strictly positive.
    InvalidBounds { field: &'static str, value: f64 },

    /// Any other reference-data failure.
    Reference(ReferenceError),
}

impl std::error::Error for AssessmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssessmentError::Reference(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentError::InvalidDateRange { birth, observation } => {
                write!(f, "Observation date {observation} is before birth date {birth}")
            }
            AssessmentError::UnsupportedAgeRange { indicator, sex, age_months, min, max } => {
                write!(
                    f,
                    "Age {age_months} months is outside the {indicator}/{sex} reference range [{min}, {max}] months"
                )
            }
            AssessmentError::UnsupportedHeightRange { sex, height_cm, min, max } => {
                write!(
                    f,
                    "Height {height_cm} cm is outside the weight_for_height/{sex} reference range [{min}, {max}] cm"
                )
            }
            AssessmentError::InvalidMeasurement { field, value } => {
                write!(f, "Invalid {field}: {value}. Must be finite and > 0.")
            }
            AssessmentError::InvalidThresholds { warning, alert } => {
                write!(
                    f,
                    "Invalid status thresholds (warning = {warning}, alert = {alert}). Must satisfy 0 < warning < alert."
                )
            }
            AssessmentError::InvalidBounds { field, value } => {
                write!(f, "Invalid measurement bound {field} = {value}. Must be finite and > 0.")
            }
            AssessmentError::Reference(err) => write!(f, "Reference data error: {err}"),
        }
    }
}

impl From<ReferenceError> for AssessmentError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::OutOfRange { indicator, sex, x, min, max } => match indicator.axis() {
                LookupAxis::AgeMonths => {
                    AssessmentError::UnsupportedAgeRange { indicator, sex, age_months: x, min, max }
                }
                LookupAxis::HeightCm => {
                    AssessmentError::UnsupportedHeightRange { sex, height_cm: x, min, max }
                }
            },
            other => AssessmentError::Reference(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<AssessmentError> for PyErr {
    fn from(err: AssessmentError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Axis-aware conversion of `ReferenceError::OutOfRange`.
    // - Passthrough of other reference errors.
    // - Payload embedding in `Display` messages.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An out-of-range age lookup becomes `UnsupportedAgeRange`.
    //
    // Given
    // -----
    // - `OutOfRange` for weight-for-age at x = 72.
    //
    // Expect
    // ------
    // - `UnsupportedAgeRange { age_months: 72, .. }`.
    fn out_of_range_age_maps_to_unsupported_age_range() {
        // Arrange
        let err = ReferenceError::OutOfRange {
            indicator: Indicator::WeightForAge,
            sex: Sex::Male,
            x: 72.0,
            min: 0.0,
            max: 60.0,
        };

        // Act
        let mapped = AssessmentError::from(err);

        // Assert
        assert_eq!(
            mapped,
            AssessmentError::UnsupportedAgeRange {
                indicator: Indicator::WeightForAge,
                sex: Sex::Male,
                age_months: 72.0,
                min: 0.0,
                max: 60.0,
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // An out-of-range height lookup becomes `UnsupportedHeightRange`.
    //
    // Given
    // -----
    // - `OutOfRange` for weight-for-height at x = 130 cm.
    //
    // Expect
    // ------
    // - `UnsupportedHeightRange { height_cm: 130, .. }` whose message
    //   names the height.
    fn out_of_range_height_maps_to_unsupported_height_range() {
        // Arrange
        let err = ReferenceError::OutOfRange {
            indicator: Indicator::WeightForHeight,
            sex: Sex::Female,
            x: 130.0,
            min: 45.0,
            max: 120.0,
        };

        // Act
        let mapped = AssessmentError::from(err);

        // Assert
        match &mapped {
            AssessmentError::UnsupportedHeightRange { height_cm, .. } => {
                assert_eq!(*height_cm, 130.0)
            }
            other => panic!("expected UnsupportedHeightRange, got {other:?}"),
        }
        assert!(mapped.to_string().contains("130 cm"));
    }

    #[test]
    fn missing_table_is_wrapped() {
        let err = ReferenceError::MissingTable { indicator: Indicator::BmiForAge, sex: Sex::Male };
        let mapped = AssessmentError::from(err.clone());
        assert_eq!(mapped, AssessmentError::Reference(err));
        assert!(std::error::Error::source(&mapped).is_some());
    }

    #[test]
    fn invalid_date_range_names_both_dates() {
        let err = AssessmentError::InvalidDateRange {
            birth: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            observation: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-03-01") && msg.contains("2024-02-01"), "Got: {msg}");
    }
}

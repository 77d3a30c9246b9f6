//! longitudinal::errors — failures of series analysis.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for trend, velocity and
//! faltering analysis. Series that are merely too short for faltering
//! detection are *not* errors there; they come back as an
//! insufficient-data result. Errors are reserved for series that cannot be
//! analyzed at all.
//!
//! Key behaviors
//! -------------
//! - Report the offending index for non-finite or out-of-order points.
//! - Wrap failures from the significance helpers and the reference tables
//!   unchanged.
//!
//! Testing notes
//! -------------
//! - Unit tests check payload embedding and the `From` conversions.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{reference::ReferenceError, statistical_tests::StatTestError};

pub type LongitudinalResult<T> = Result<T, LongitudinalError>;

/// Error conditions raised while analyzing a growth series.
#[derive(Debug, Clone, PartialEq)]
pub enum LongitudinalError {
    //------ Series validation ------
    /// Fewer points than the analysis needs.
    InsufficientData { required: usize, actual: usize },

    /// A value or z-score at `index` is NaN or ±∞.
    NonFiniteValue { index: usize, value: f64 },

    /// Point `index` is dated or aged before its predecessor.
    OutOfOrder { index: usize },

    /// Every point has the same age, so no slope exists.
    ZeroAgeSpan { age_months: u32 },

    //------ Configuration ------
    InvalidOptions { field: &'static str, value: f64 },

    //------ Wrapped ------
    StatTest(StatTestError),
    Reference(ReferenceError),
}

impl std::error::Error for LongitudinalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LongitudinalError::StatTest(err) => Some(err),
            LongitudinalError::Reference(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for LongitudinalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LongitudinalError::InsufficientData { required, actual } => {
                write!(f, "Insufficient data: need at least {required} points, got {actual}.")
            }
            LongitudinalError::NonFiniteValue { index, value } => {
                write!(f, "Series point {index} has a non-finite value ({value}).")
            }
            LongitudinalError::OutOfOrder { index } => {
                write!(f, "Series point {index} precedes the previous point; series must be ordered by date.")
            }
            LongitudinalError::ZeroAgeSpan { age_months } => {
                write!(f, "All points are at age {age_months} months; a trend needs at least two distinct ages.")
            }
            LongitudinalError::InvalidOptions { field, value } => {
                write!(f, "Invalid option {field} = {value}.")
            }
            LongitudinalError::StatTest(err) => write!(f, "Statistical test error: {err}"),
            LongitudinalError::Reference(err) => write!(f, "Reference data error: {err}"),
        }
    }
}

impl From<StatTestError> for LongitudinalError {
    fn from(err: StatTestError) -> Self {
        LongitudinalError::StatTest(err)
    }
}

impl From<ReferenceError> for LongitudinalError {
    fn from(err: ReferenceError) -> Self {
        LongitudinalError::Reference(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<LongitudinalError> for PyErr {
    fn from(err: LongitudinalError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

//! statistical_tests::errors — failures of the numeric significance helpers.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the small statistical
//! utilities in this subtree (normal CDF helpers and the regression-slope
//! t-test), plus the conversion into Python exceptions used by the PyO3
//! bindings.
//!
//! Key behaviors
//! -------------
//! - Report degenerate inputs (too few points, non-finite values, paired
//!   series of unequal length, zero spread in the regressor) with the
//!   offending payload.
//! - Wrap `statrs` distribution construction failures as a plain message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Routines in this subtree validate their inputs and return
//!   [`StatTestResult<T>`] instead of panicking.
//! - Values are small and `Clone` so they can be embedded in the
//!   longitudinal error type unchanged.
//!
//! Testing notes
//! -------------
//! - Unit tests check payload embedding in `Display` output. The PyO3
//!   conversion is left to Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type StatTestResult<T> = Result<T, StatTestError>;

/// Error conditions for significance and distribution helpers.
///
/// Variants
/// --------
/// - `InsufficientData { required, actual }`
///   Fewer observations than the routine needs (a slope t-test needs three
///   points to leave one residual degree of freedom).
/// - `InvalidData { index, value }`
///   A non-finite element at position `index`.
/// - `LengthMismatch { x_len, y_len }`
///   Paired inputs of different lengths.
/// - `ZeroVariance`
///   The regressor has no spread, so the slope is undefined.
/// - `InvalidProbability(p)`
///   A percentile/probability outside the open interval the inverse CDF
///   accepts.
/// - `Distribution(msg)`
///   `statrs` rejected the distribution parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum StatTestError {
    //------ Input validation errors ------
    InsufficientData { required: usize, actual: usize },
    InvalidData { index: usize, value: f64 },
    LengthMismatch { x_len: usize, y_len: usize },
    ZeroVariance,
    InvalidProbability(f64),

    //------ Numerical errors ------
    Distribution(String),
}

impl std::error::Error for StatTestError {}

impl std::fmt::Display for StatTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatTestError::InsufficientData { required, actual } => {
                write!(f, "Need at least {required} observations, got {actual}.")
            }
            StatTestError::InvalidData { index, value } => {
                write!(f, "Invalid data value at index {index}: {value}. Must be a finite number.")
            }
            StatTestError::LengthMismatch { x_len, y_len } => {
                write!(f, "Paired series differ in length: x has {x_len}, y has {y_len}.")
            }
            StatTestError::ZeroVariance => {
                write!(f, "Regressor has zero variance; slope is undefined.")
            }
            StatTestError::InvalidProbability(p) => {
                write!(f, "Invalid percentile {p}. Must lie strictly between 0 and 100.")
            }
            StatTestError::Distribution(msg) => write!(f, "Distribution error: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<StatTestError> for PyErr {
    fn from(err: StatTestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

//! reference::errors — configuration and lookup failures for reference data.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used while building and querying
//! [`ReferenceStandards`](crate::reference::ReferenceStandards). Building the
//! standards is a startup step: any error raised here means the process must
//! refuse to serve growth assessments rather than return wrong numbers.
//!
//! Key behaviors
//! -------------
//! - Report malformed table rows (non-finite or non-positive M/S, duplicated
//!   or unsorted axis values, broken velocity bands) with enough context to
//!   locate the offending row.
//! - Report missing tables for a required (indicator, sex) pair.
//! - Report lookups outside the tabulated axis range. The assessment layer
//!   maps these to `UnsupportedAgeRange` / `UnsupportedHeightRange`.
//! - Wrap JSON decoding failures from `serde_json` as plain messages so the
//!   enum stays `Clone + PartialEq`.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the table row that failed, e.g.
//!   "weight_for_age/female at x = 12: S must be finite and > 0".
//!
//! Testing notes
//! -------------
//! - Unit tests check that payloads are embedded in `Display` output and that
//!   `serde_json` errors convert through `From`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::reference::indicator::{Indicator, Sex};

pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Error conditions raised while building or querying reference tables.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceError {
    // ---- Table construction ----
    /// An LMS row carries an invalid L, M or S value.
    InvalidParams { indicator: Indicator, sex: Sex, x: f64, reason: &'static str },

    /// An LMS row has a NaN/±inf axis value.
    NonFiniteAxis { indicator: Indicator, sex: Sex, x: f64 },

    /// Two LMS rows share the same axis value.
    DuplicateAxisValue { indicator: Indicator, sex: Sex, x: f64 },

    /// A velocity band is empty, overlapping, or carries an invalid mean/sd.
    InvalidVelocityBand {
        indicator: Indicator,
        sex: Sex,
        start_month: u32,
        end_month: u32,
        reason: &'static str,
    },

    // ---- Completeness ----
    /// No LMS table exists for the requested (indicator, sex) pair.
    MissingTable { indicator: Indicator, sex: Sex },

    /// No velocity table exists for the requested (indicator, sex) pair.
    MissingVelocityTable { indicator: Indicator, sex: Sex },

    // ---- Lookup ----
    /// The requested axis value lies outside the tabulated range.
    OutOfRange { indicator: Indicator, sex: Sex, x: f64, min: f64, max: f64 },

    // ---- Parsing ----
    UnknownSex(String),
    UnknownIndicator(String),
    Json(String),
    Io(String),
}

impl std::error::Error for ReferenceError {}

#[cfg(feature = "python-bindings")]
impl From<ReferenceError> for PyErr {
    fn from(err: ReferenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Table construction ----
            ReferenceError::InvalidParams { indicator, sex, x, reason } => {
                write!(f, "{indicator}/{sex} at x = {x}: {reason}")
            }
            ReferenceError::NonFiniteAxis { indicator, sex, x } => {
                write!(f, "{indicator}/{sex}: axis value {x} is not finite")
            }
            ReferenceError::DuplicateAxisValue { indicator, sex, x } => {
                write!(f, "{indicator}/{sex}: axis value {x} appears more than once")
            }
            ReferenceError::InvalidVelocityBand { indicator, sex, start_month, end_month, reason } => {
                write!(
                    f,
                    "{indicator}/{sex} velocity band [{start_month}, {end_month}): {reason}"
                )
            }

            // ---- Completeness ----
            ReferenceError::MissingTable { indicator, sex } => {
                write!(f, "No LMS reference table for {indicator}/{sex}")
            }
            ReferenceError::MissingVelocityTable { indicator, sex } => {
                write!(f, "No velocity reference table for {indicator}/{sex}")
            }

            // ---- Lookup ----
            ReferenceError::OutOfRange { indicator, sex, x, min, max } => {
                write!(f, "{indicator}/{sex}: {x} is outside the tabulated range [{min}, {max}]")
            }

            // ---- Parsing ----
            ReferenceError::UnknownSex(raw) => {
                write!(f, "Unknown sex {raw:?} (expected 'male' or 'female')")
            }
            ReferenceError::UnknownIndicator(raw) => write!(f, "Unknown indicator {raw:?}"),
            ReferenceError::Json(msg) => write!(f, "Malformed reference document: {msg}"),
            ReferenceError::Io(msg) => write!(f, "Could not read reference document: {msg}"),
        }
    }
}

impl From<serde_json::Error> for ReferenceError {
    fn from(err: serde_json::Error) -> Self {
        ReferenceError::Json(err.to_string())
    }
}

impl From<std::io::Error> for ReferenceError {
    fn from(err: std::io::Error) -> Self {
        ReferenceError::Io(err.to_string())
    }
}

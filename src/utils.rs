//! Conversion helpers for the Python bridge.
//!
//! Python callers pass sexes, indicators and dates as strings, and series
//! as sequences of `(date, age_in_months, value, z_score)` tuples. Results
//! go back as plain dicts built from each type's serde representation.
#[cfg(feature = "python-bindings")]
use chrono::NaiveDate;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use serde::Serialize;

#[cfg(feature = "python-bindings")]
use crate::{
    assessment::StatusThresholds,
    longitudinal::GrowthDataPoint,
    reference::{Indicator, Sex},
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn parse_sex(raw: &str) -> PyResult<Sex> {
    Ok(raw.parse::<Sex>()?)
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn parse_indicator(raw: &str) -> PyResult<Indicator> {
    Ok(raw.parse::<Indicator>()?)
}

/// Parse an ISO `YYYY-MM-DD` date.
#[cfg(feature = "python-bindings")]
pub fn parse_date(raw: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid date '{raw}': {e} (expected YYYY-MM-DD)")))
}

/// Extract a growth series from a sequence of
/// `(date, age_in_months, value, z_score)` tuples.
///
/// The status of each point is recomputed from its z-score with
/// `thresholds`, so Python callers do not need to persist it.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(
    raw: &Bound<'py, PyAny>, thresholds: &StatusThresholds,
) -> PyResult<Vec<GrowthDataPoint>> {
    let rows: Vec<(String, u32, f64, f64)> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a sequence of (date, age_in_months, value, z_score) tuples")
    })?;
    rows.into_iter()
        .map(|(date, age, value, z)| {
            Ok(GrowthDataPoint::new(parse_date(&date)?, age, value, z, thresholds.status_for(z)))
        })
        .collect()
}

/// Convert any serializable result into a Python dict (via `json.loads`).
#[cfg(feature = "python-bindings")]
pub fn to_py_object<'py, T: Serialize>(py: Python<'py>, value: &T) -> PyResult<Bound<'py, PyAny>> {
    let json = serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("failed to serialize result: {e}")))?;
    py.import("json")?.call_method1("loads", (json,))
}

//! growth_analytics — child growth assessment against WHO reference standards,
//! with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the growth engine to Python via the `_growth_analytics` extension module.
//! The crate converts anthropometric measurements into z-scores, percentiles
//! and clinical flags, and analyzes series of measurements for trends,
//! velocity and growth faltering.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules as the public crate surface:
//!   `reference` (LMS and velocity tables), `assessment` (point-in-time
//!   z-scores, BMI, validation, classification), `longitudinal` (trend,
//!   velocity, faltering), `statistical_tests` (normal CDF and slope
//!   significance) and `engine` (the [`GrowthEngine`](engine::GrowthEngine)
//!   façade).
//! - Define the `GrowthAssessor` `#[pyclass]` and the `#[pymodule]`
//!   initializer for the `_growth_analytics` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument parsing and error mapping.
//! - Reference standards are built once per `GrowthAssessor` and never
//!   mutated afterwards.
//!
//! Conventions
//! -----------
//! - Sexes, indicators and dates cross the boundary as strings
//!   (`"male"`, `"weight_for_age"`, `"2024-03-01"`); results come back as
//!   dicts mirroring the serde form of the Rust result types.
//! - Errors from core Rust code are rich enums internally and become
//!   `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should use [`engine::GrowthEngine`] or the inner
//!   modules directly and can ignore the items behind `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; `tests/integration_growth_pipeline.rs`
//!   exercises the full visit-to-faltering flow through the public API.

pub mod assessment;
pub mod engine;
pub mod longitudinal;
pub mod reference;
pub mod statistical_tests;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    assessment::{StatusThresholds, ZScoreOptions},
    engine::{EngineOptions, GrowthEngine},
    reference::ReferenceStandards,
    utils::{extract_series, parse_date, parse_indicator, parse_sex, to_py_object},
};

/// GrowthAssessor — Python-facing wrapper around [`GrowthEngine`].
///
/// Purpose
/// -------
/// Own a set of reference standards and engine options, and forward every
/// call to a [`GrowthEngine`] borrowing them.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `GrowthAssessor(warning=2.0, alert=3.0, tail_adjustment=False)`:
/// - `warning`, `alert`: `f64`
///   Absolute z-score cut-offs for Warning and Alert; `0 < warning < alert`.
/// - `tail_adjustment`: `bool`
///   Apply the WHO restricted-tail adjustment beyond |z| = 3.
///
/// Notes
/// -----
/// - `GrowthAssessor.from_json(document, ...)` builds the assessor over a
///   substitute reference document instead of the bundled WHO tables.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "growth_analytics")]
pub struct GrowthAssessor {
    standards: ReferenceStandards,
    options: EngineOptions,
}

#[cfg(feature = "python-bindings")]
impl GrowthAssessor {
    fn build(
        standards: ReferenceStandards, warning: f64, alert: f64, tail_adjustment: bool,
    ) -> PyResult<GrowthAssessor> {
        let thresholds = StatusThresholds::new(warning, alert)?;
        let options =
            EngineOptions { zscore: ZScoreOptions::new(thresholds, tail_adjustment), ..EngineOptions::default() };
        Ok(GrowthAssessor { standards, options })
    }

    fn engine(&self) -> GrowthEngine<'_> {
        GrowthEngine::new(&self.standards, self.options)
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GrowthAssessor {
    #[new]
    #[pyo3(
        signature = (warning = 2.0, alert = 3.0, tail_adjustment = false),
        text_signature = "(warning=2.0, alert=3.0, tail_adjustment=False)"
    )]
    pub fn new(warning: f64, alert: f64, tail_adjustment: bool) -> PyResult<GrowthAssessor> {
        GrowthAssessor::build(ReferenceStandards::who()?, warning, alert, tail_adjustment)
    }

    #[staticmethod]
    #[pyo3(
        signature = (document, warning = 2.0, alert = 3.0, tail_adjustment = false),
        text_signature = "(document, /, warning=2.0, alert=3.0, tail_adjustment=False)"
    )]
    pub fn from_json(document: &str, warning: f64, alert: f64, tail_adjustment: bool) -> PyResult<GrowthAssessor> {
        GrowthAssessor::build(ReferenceStandards::from_json_str(document)?, warning, alert, tail_adjustment)
    }

    #[pyo3(text_signature = "(self, birth_date, observation_date)")]
    pub fn age_in_months(&self, birth_date: &str, observation_date: &str) -> PyResult<u32> {
        Ok(self.engine().age_in_months(parse_date(birth_date)?, parse_date(observation_date)?)?)
    }

    #[pyo3(
        signature = (weight_kg, height_cm, age_in_months, head_circumference_cm = None),
        text_signature = "(self, weight_kg, height_cm, age_in_months, /, head_circumference_cm=None)"
    )]
    pub fn validate<'py>(
        &self, py: Python<'py>, weight_kg: f64, height_cm: f64, age_in_months: u32,
        head_circumference_cm: Option<f64>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let report = self.engine().validate(weight_kg, height_cm, head_circumference_cm, age_in_months);
        to_py_object(py, &report)
    }

    #[pyo3(
        signature = (weight_kg, height_cm, age_in_months, sex, head_circumference_cm = None),
        text_signature = "(self, weight_kg, height_cm, age_in_months, sex, /, head_circumference_cm=None)"
    )]
    pub fn assess_all<'py>(
        &self, py: Python<'py>, weight_kg: f64, height_cm: f64, age_in_months: u32, sex: &str,
        head_circumference_cm: Option<f64>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let sex = parse_sex(sex)?;
        let all = self.engine().assess_all(weight_kg, height_cm, head_circumference_cm, age_in_months, sex)?;
        to_py_object(py, &all)
    }

    /// Assess one value; `x` is the age in months, or the height in cm for
    /// weight-for-height.
    #[pyo3(text_signature = "(self, indicator, sex, x, value)")]
    pub fn assess<'py>(
        &self, py: Python<'py>, indicator: &str, sex: &str, x: f64, value: f64,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.engine().assess(parse_indicator(indicator)?, parse_sex(sex)?, x, value)?;
        to_py_object(py, &result)
    }

    #[pyo3(text_signature = "(self, z_score)")]
    pub fn classify<'py>(&self, py: Python<'py>, z_score: f64) -> PyResult<Bound<'py, PyAny>> {
        to_py_object(py, &self.engine().classify(z_score))
    }

    #[pyo3(text_signature = "(self, weight_kg, height_cm, age_in_months, sex)")]
    pub fn bmi_for_age<'py>(
        &self, py: Python<'py>, weight_kg: f64, height_cm: f64, age_in_months: u32, sex: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let result = self.engine().bmi_for_age(weight_kg, height_cm, age_in_months, parse_sex(sex)?)?;
        to_py_object(py, &result)
    }

    /// Series are sequences of `(date, age_in_months, value, z_score)`.
    #[pyo3(text_signature = "(self, series, indicator, sex)")]
    pub fn analyze_trend<'py>(
        &self, py: Python<'py>, series: &Bound<'py, PyAny>, indicator: &str, sex: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let points = extract_series(series, &self.options.zscore.thresholds)?;
        let trend = self.engine().analyze_trend(&points, parse_indicator(indicator)?, parse_sex(sex)?)?;
        to_py_object(py, &trend)
    }

    #[pyo3(text_signature = "(self, series, indicator, sex)")]
    pub fn velocity<'py>(
        &self, py: Python<'py>, series: &Bound<'py, PyAny>, indicator: &str, sex: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let points = extract_series(series, &self.options.zscore.thresholds)?;
        let velocity = self.engine().velocity(&points, parse_indicator(indicator)?, parse_sex(sex)?)?;
        to_py_object(py, &velocity)
    }

    #[pyo3(text_signature = "(self, weight_series, height_series, sex)")]
    pub fn detect_faltering<'py>(
        &self, py: Python<'py>, weight_series: &Bound<'py, PyAny>, height_series: &Bound<'py, PyAny>,
        sex: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let thresholds = self.options.zscore.thresholds;
        let weight = extract_series(weight_series, &thresholds)?;
        let height = extract_series(height_series, &thresholds)?;
        let result = self.engine().detect_faltering(&weight, &height, parse_sex(sex)?)?;
        to_py_object(py, &result)
    }
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _growth_analytics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<GrowthAssessor>()?;
    Ok(())
}

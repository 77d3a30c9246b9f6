//! assessment::options — validated configuration for point-in-time assessment.
//!
//! Purpose
//! -------
//! Hold the tunable constants of the assessment layer: the |z| cut-offs
//! that separate Normal/Warning/Alert, the plausibility bounds applied by
//! the measurement validator, and the z-score engine switches.
//!
//! Key behaviors
//! -------------
//! - Every struct is `Copy` and has a `Default` carrying the documented
//!   clinical defaults (warning 2, alert 3; weight ≤ 50 kg, height ≤ 150 cm,
//!   head circumference ≤ 70 cm, age ≤ 60 months; tail adjustment off).
//! - Non-default values go through `new(..)`, which enforces the invariants
//!   once so downstream code never rechecks them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < warning < alert`, both finite.
//! - Every measurement bound is finite and > 0.
//!
//! Conventions
//! -----------
//! - Boundaries belong to the milder band: |z| = warning is Normal and
//!   |z| = alert is Warning.
use serde::{Deserialize, Serialize};

use crate::assessment::{
    errors::{AssessmentError, AssessmentResult},
    status::GrowthStatus,
};

/// |z| cut-offs for the Warning and Alert bands.
///
/// Fields
/// ------
/// - `warning`: `f64`
///   |z| strictly above this is at least Warning (default 2.0).
/// - `alert`: `f64`
///   |z| strictly above this is Alert (default 3.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub warning: f64,
    pub alert: f64,
}

impl StatusThresholds {
    /// Construct validated thresholds.
    ///
    /// Errors
    /// ------
    /// - `AssessmentError::InvalidThresholds` unless both values are finite
    ///   and `0 < warning < alert`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use growth_analytics::assessment::{GrowthStatus, StatusThresholds};
    /// let strict = StatusThresholds::new(1.5, 2.5).unwrap();
    /// assert_eq!(strict.status_for(-2.0), GrowthStatus::Warning);
    /// assert!(StatusThresholds::new(3.0, 2.0).is_err());
    /// ```
    pub fn new(warning: f64, alert: f64) -> AssessmentResult<StatusThresholds> {
        let valid = warning.is_finite() && alert.is_finite() && warning > 0.0 && warning < alert;
        if !valid {
            return Err(AssessmentError::InvalidThresholds { warning, alert });
        }
        Ok(StatusThresholds { warning, alert })
    }

    /// Status band for a z-score. NaN is treated as Alert.
    pub fn status_for(&self, z: f64) -> GrowthStatus {
        let magnitude = z.abs();
        if magnitude <= self.warning {
            GrowthStatus::Normal
        } else if magnitude <= self.alert {
            GrowthStatus::Warning
        } else {
            GrowthStatus::Alert
        }
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        StatusThresholds { warning: 2.0, alert: 3.0 }
    }
}

/// Upper plausibility bounds used by the measurement validator.
///
/// Lower bounds are fixed at "strictly positive"; only the maxima vary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBounds {
    pub max_weight_kg: f64,
    pub max_height_cm: f64,
    pub max_head_circumference_cm: f64,
    pub max_age_months: u32,
}

impl MeasurementBounds {
    /// Construct validated bounds.
    ///
    /// Errors
    /// ------
    /// - `AssessmentError::InvalidBounds` naming the first bound that is
    ///   non-finite or ≤ 0.
    pub fn new(
        max_weight_kg: f64, max_height_cm: f64, max_head_circumference_cm: f64, max_age_months: u32,
    ) -> AssessmentResult<MeasurementBounds> {
        for (field, value) in [
            ("max_weight_kg", max_weight_kg),
            ("max_height_cm", max_height_cm),
            ("max_head_circumference_cm", max_head_circumference_cm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AssessmentError::InvalidBounds { field, value });
            }
        }
        Ok(MeasurementBounds { max_weight_kg, max_height_cm, max_head_circumference_cm, max_age_months })
    }
}

impl Default for MeasurementBounds {
    fn default() -> Self {
        MeasurementBounds {
            max_weight_kg: 50.0,
            max_height_cm: 150.0,
            max_head_circumference_cm: 70.0,
            max_age_months: 60,
        }
    }
}

/// Switches for the z-score engine.
///
/// Fields
/// ------
/// - `thresholds`: status cut-offs applied to every computed z-score.
/// - `tail_adjustment`: apply the WHO restricted-tail correction beyond
///   ±3 SD (off by default, so z is the plain LMS value).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZScoreOptions {
    pub thresholds: StatusThresholds,
    pub tail_adjustment: bool,
}

impl ZScoreOptions {
    pub fn new(thresholds: StatusThresholds, tail_adjustment: bool) -> ZScoreOptions {
        ZScoreOptions { thresholds, tail_adjustment }
    }
}

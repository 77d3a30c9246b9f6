//! assessment::zscore — LMS z-scores, percentiles and status.
//!
//! Purpose
//! -------
//! Turn a raw measurement into a standardized score against the reference
//! distribution for its (indicator, sex, age-or-height), and attach the
//! percentile, status band and a user-facing message.
//!
//! Key behaviors
//! -------------
//! - L, M and S are interpolated on the lookup axis by
//!   [`ReferenceStandards::lms`] before the transform is applied.
//! - With `tail_adjustment` enabled, |z| > 3 is recomputed with the WHO
//!   restricted-tail formula; otherwise z is the plain LMS value.
//! - percentile = Φ(z)·100 through
//!   [`percentile_from_z`](crate::statistical_tests::percentile_from_z).
//! - `implausible` flags biologically implausible values using the WHO
//!   cut-offs (weight-for-age below −6 or above 5, height-for-age beyond
//!   ±6, all others beyond ±5). Such results are still returned, and a
//!   `warn!` is logged.
//! - [`ZScoreEngine::value_at_z`] inverts the transform for centile curves.
//!
//! Invariants & assumptions
//! ------------------------
//! - Measured values must be finite and > 0; anything else is
//!   `InvalidMeasurement`, never a NaN z-score.
//! - Ages outside the table give `UnsupportedAgeRange`; heights outside the
//!   weight-for-height table give `UnsupportedHeightRange`. Nothing is
//!   extrapolated.
//! - [`ZScoreEngine::assess_all`] only fails on the age-indexed indicators.
//!   A valid child whose height lies outside the weight-for-height table
//!   (a 44 cm newborn, a tall 5-year-old) still gets every other result,
//!   with `weight_for_height = None`.
//! - For fixed (indicator, sex, x), z is strictly increasing in the value,
//!   so percentile ordering always agrees with z ordering.
//!
//! Downstream usage
//! ----------------
//! - ```rust
//!   use growth_analytics::assessment::{ZScoreEngine, ZScoreOptions, GrowthStatus};
//!   use growth_analytics::reference::{Indicator, ReferenceStandards, Sex};
//!
//!   let standards = ReferenceStandards::who()?;
//!   let engine = ZScoreEngine::new(&standards, ZScoreOptions::default());
//!   let result = engine.assess(Indicator::WeightForAge, Sex::Male, 12.0, 9.6479)?;
//!   assert!(result.z_score.abs() < 1e-9);
//!   assert_eq!(result.status, GrowthStatus::Normal);
//!   # Ok::<(), Box<dyn std::error::Error>>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover z = 0 at the median, reference-table anchor values,
//!   interpolation between tabulated ages, the range errors for both axes,
//!   the implausible flag, and proptest monotonicity in the value.
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{
        errors::{AssessmentError, AssessmentResult},
        options::ZScoreOptions,
        status::GrowthStatus,
    },
    reference::{Indicator, ReferenceStandards, Sex},
    statistical_tests::{percentile_from_z, z_from_percentile},
};

/// Standardized assessment of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub indicator: Indicator,
    pub z_score: f64,
    /// Φ(z)·100, in [0, 100].
    pub percentile: f64,
    pub status: GrowthStatus,
    pub message: String,
    /// Outside the WHO biologically-plausible range for this indicator.
    pub implausible: bool,
}

/// Results of [`ZScoreEngine::assess_all`] for one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllIndicators {
    pub weight_for_age: ZScoreResult,
    pub height_for_age: ZScoreResult,
    /// `None` when the height lies outside the weight-for-height table.
    pub weight_for_height: Option<ZScoreResult>,
    pub head_circumference_for_age: Option<ZScoreResult>,
}

impl AllIndicators {
    /// Present results in a fixed order (WFA, HFA, WFH, HC).
    pub fn iter(&self) -> impl Iterator<Item = &ZScoreResult> {
        [&self.weight_for_age, &self.height_for_age]
            .into_iter()
            .chain(self.weight_for_height.as_ref())
            .chain(self.head_circumference_for_age.as_ref())
    }

    pub fn worst_status(&self) -> GrowthStatus {
        self.iter().map(|r| r.status).max().unwrap_or(GrowthStatus::Normal)
    }
}

/// Name of the measured quantity for an indicator, used in errors.
fn value_field(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::WeightForAge | Indicator::WeightForHeight => "weight_kg",
        Indicator::HeightForAge => "height_cm",
        Indicator::HeadCircumferenceForAge => "head_circumference_cm",
        Indicator::BmiForAge => "bmi",
    }
}

fn is_implausible(indicator: Indicator, z: f64) -> bool {
    match indicator {
        Indicator::WeightForAge => !(-6.0..=5.0).contains(&z),
        Indicator::HeightForAge => z.abs() > 6.0,
        Indicator::WeightForHeight | Indicator::BmiForAge | Indicator::HeadCircumferenceForAge => {
            z.abs() > 5.0
        }
    }
}

fn status_message(indicator: Indicator, z: f64, percentile: f64, status: GrowthStatus) -> String {
    let label = indicator.label();
    let side = if z < 0.0 { "below" } else { "above" };
    match status {
        GrowthStatus::Normal => {
            format!("{label} is within the normal range ({percentile:.1}th percentile).")
        }
        GrowthStatus::Warning => format!(
            "{label} is {side} the normal range (z = {z:.2}, {percentile:.1}th percentile). Monitor at the next visit."
        ),
        GrowthStatus::Alert => format!(
            "{label} is far {side} the normal range (z = {z:.2}, {percentile:.1}th percentile). Refer for clinical review."
        ),
    }
}

/// LMS z-score engine over a borrowed reference set.
#[derive(Debug, Clone, Copy)]
pub struct ZScoreEngine<'a> {
    standards: &'a ReferenceStandards,
    options: ZScoreOptions,
}

impl<'a> ZScoreEngine<'a> {
    pub fn new(standards: &'a ReferenceStandards, options: ZScoreOptions) -> ZScoreEngine<'a> {
        ZScoreEngine { standards, options }
    }

    pub fn standards(&self) -> &'a ReferenceStandards {
        self.standards
    }

    pub fn options(&self) -> &ZScoreOptions {
        &self.options
    }

    /// Raw z-score of `value` at axis value `x`.
    ///
    /// `x` is the age in months, or the height in cm for
    /// [`Indicator::WeightForHeight`].
    ///
    /// Errors
    /// ------
    /// - `InvalidMeasurement` if `value` (or the height axis value) is
    ///   non-finite or ≤ 0.
    /// - `UnsupportedAgeRange` / `UnsupportedHeightRange` outside the table.
    /// - `Reference` if the table is missing.
    pub fn z_score(&self, indicator: Indicator, sex: Sex, x: f64, value: f64) -> AssessmentResult<f64> {
        if !value.is_finite() || value <= 0.0 {
            return Err(AssessmentError::InvalidMeasurement { field: value_field(indicator), value });
        }
        if indicator == Indicator::WeightForHeight && !(x.is_finite() && x > 0.0) {
            return Err(AssessmentError::InvalidMeasurement { field: "height_cm", value: x });
        }

        let params = self.standards.lms(indicator, sex, x)?;
        let z = if self.options.tail_adjustment {
            params.z_score_restricted(value)
        } else {
            params.z_score(value)
        };
        debug!("{indicator}/{sex} at x = {x}: value = {value}, L = {}, M = {}, S = {} -> z = {z:.4}", params.l, params.m, params.s);
        Ok(z)
    }

    /// Full assessment of one indicator.
    ///
    /// Errors
    /// ------
    /// - As for [`z_score`](Self::z_score).
    pub fn assess(&self, indicator: Indicator, sex: Sex, x: f64, value: f64) -> AssessmentResult<ZScoreResult> {
        let z_score = self.z_score(indicator, sex, x, value)?;
        let percentile = percentile_from_z(z_score);
        let status = self.options.thresholds.status_for(z_score);
        let implausible = is_implausible(indicator, z_score);
        if implausible {
            warn!("implausible {indicator} z-score {z_score:.2} for {sex} at x = {x} (value {value})");
        }
        Ok(ZScoreResult {
            indicator,
            z_score,
            percentile,
            status,
            message: status_message(indicator, z_score, percentile, status),
            implausible,
        })
    }

    /// Assess weight-for-age, height-for-age, weight-for-height and, when a
    /// head circumference is given, head-circumference-for-age.
    ///
    /// A height outside the weight-for-height table leaves
    /// `weight_for_height` as `None` instead of failing the call.
    ///
    /// Errors
    /// ------
    /// - The first failing indicator's error, in the order above, other than
    ///   `UnsupportedHeightRange` for weight-for-height.
    pub fn assess_all(
        &self, weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, age_months: u32,
        sex: Sex,
    ) -> AssessmentResult<AllIndicators> {
        let age = age_months as f64;
        let weight_for_age = self.assess(Indicator::WeightForAge, sex, age, weight_kg)?;
        let height_for_age = self.assess(Indicator::HeightForAge, sex, age, height_cm)?;
        let weight_for_height = match self.assess(Indicator::WeightForHeight, sex, height_cm, weight_kg) {
            Ok(result) => Some(result),
            Err(AssessmentError::UnsupportedHeightRange { height_cm, min, max, .. }) => {
                debug!("weight-for-height skipped: {height_cm} cm outside [{min}, {max}] cm");
                None
            }
            Err(err) => return Err(err),
        };
        let head_circumference_for_age = head_circumference_cm
            .map(|hc| self.assess(Indicator::HeadCircumferenceForAge, sex, age, hc))
            .transpose()?;
        Ok(AllIndicators { weight_for_age, height_for_age, weight_for_height, head_circumference_for_age })
    }

    /// Measurement value at z-score `z` (inverse LMS), for centile curves.
    ///
    /// Errors
    /// ------
    /// - `InvalidMeasurement { field: "z_score" }` when `z` is non-finite or
    ///   the Box–Cox inverse is undefined at this z.
    /// - Range/reference errors as for [`z_score`](Self::z_score).
    pub fn value_at_z(&self, indicator: Indicator, sex: Sex, x: f64, z: f64) -> AssessmentResult<f64> {
        if !z.is_finite() {
            return Err(AssessmentError::InvalidMeasurement { field: "z_score", value: z });
        }
        let params = self.standards.lms(indicator, sex, x)?;
        params.value_at(z).ok_or(AssessmentError::InvalidMeasurement { field: "z_score", value: z })
    }

    /// Measurement value at a percentile in (0, 100).
    pub fn value_at_percentile(
        &self, indicator: Indicator, sex: Sex, x: f64, percentile: f64,
    ) -> AssessmentResult<f64> {
        let z = z_from_percentile(percentile)
            .map_err(|_| AssessmentError::InvalidMeasurement { field: "percentile", value: percentile })?;
        self.value_at_z(indicator, sex, x, z)
    }
}

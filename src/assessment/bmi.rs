//! BMI and BMI-for-age.
//!
//! BMI is kept at full precision; [`BmiResult::bmi_rounded`] exists for
//! display only. The BMI-for-age score is an ordinary LMS z-score against
//! the BMI table.
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{
        errors::{AssessmentError, AssessmentResult},
        status::GrowthStatus,
        zscore::ZScoreEngine,
    },
    reference::{Indicator, Sex},
};

/// BMI-for-age assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// kg/m², full precision.
    pub bmi: f64,
    pub z_score: f64,
    pub percentile: f64,
    pub status: GrowthStatus,
    pub message: String,
    pub implausible: bool,
}

impl BmiResult {
    /// BMI rounded to one decimal, for presentation.
    pub fn bmi_rounded(&self) -> f64 {
        (self.bmi * 10.0).round() / 10.0
    }
}

/// Body-mass index, weight / (height in m)².
///
/// Errors
/// ------
/// - `InvalidMeasurement` when either input is non-finite or ≤ 0.
pub fn bmi(weight_kg: f64, height_cm: f64) -> AssessmentResult<f64> {
    for (field, value) in [("weight_kg", weight_kg), ("height_cm", height_cm)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AssessmentError::InvalidMeasurement { field, value });
        }
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

impl ZScoreEngine<'_> {
    /// Compute BMI and assess it against the BMI-for-age table.
    ///
    /// Errors
    /// ------
    /// - `InvalidMeasurement` for non-positive inputs.
    /// - `UnsupportedAgeRange` outside the table.
    pub fn bmi_for_age(
        &self, weight_kg: f64, height_cm: f64, age_months: u32, sex: Sex,
    ) -> AssessmentResult<BmiResult> {
        let bmi = bmi(weight_kg, height_cm)?;
        let result = self.assess(Indicator::BmiForAge, sex, age_months as f64, bmi)?;
        Ok(BmiResult {
            bmi,
            z_score: result.z_score,
            percentile: result.percentile,
            status: result.status,
            message: result.message,
            implausible: result.implausible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assessment::options::ZScoreOptions, reference::ReferenceStandards};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The BMI formula and its presentation rounding.
    // - Delegation to the BMI-for-age LMS table.
    // - Input and age-range errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // BMI is weight over height in metres squared, unrounded.
    //
    // Given
    // -----
    // - 10 kg at 75 cm.
    //
    // Expect
    // ------
    // - 17.777…, rounded to 17.8 for display only.
    fn bmi_uses_height_in_metres() {
        // Arrange / Act
        let value = bmi(10.0, 75.0).unwrap();

        // Assert
        assert_relative_eq!(value, 10.0 / 0.5625, epsilon = 1e-12);
        let result = BmiResult {
            bmi: value,
            z_score: 0.0,
            percentile: 50.0,
            status: GrowthStatus::Normal,
            message: String::new(),
            implausible: false,
        };
        assert_eq!(result.bmi_rounded(), 17.8);
    }

    #[test]
    // Purpose
    // -------
    // A BMI at the table median scores z = 0.
    //
    // Given
    // -----
    // - Boy at 12 months, height 100 cm and weight equal to M = 16.7981.
    //
    // Expect
    // ------
    // - BMI = 16.7981, z = 0, Normal.
    fn bmi_for_age_delegates_to_bmi_table() {
        // Arrange
        let standards = ReferenceStandards::who().unwrap();
        let engine = ZScoreEngine::new(&standards, ZScoreOptions::default());

        // Act
        let result = engine.bmi_for_age(16.7981, 100.0, 12, Sex::Male).unwrap();

        // Assert
        assert_relative_eq!(result.bmi, 16.7981, epsilon = 1e-12);
        assert_relative_eq!(result.z_score, 0.0, epsilon = 1e-9);
        assert_eq!(result.status, GrowthStatus::Normal);
        assert!(result.message.contains("BMI-for-age"));
    }

    #[test]
    fn invalid_inputs_and_ages_are_errors() {
        let standards = ReferenceStandards::who().unwrap();
        let engine = ZScoreEngine::new(&standards, ZScoreOptions::default());
        assert_eq!(
            engine.bmi_for_age(8.0, 0.0, 6, Sex::Female),
            Err(AssessmentError::InvalidMeasurement { field: "height_cm", value: 0.0 })
        );
        assert!(matches!(
            engine.bmi_for_age(20.0, 110.0, 72, Sex::Female),
            Err(AssessmentError::UnsupportedAgeRange { .. })
        ));
    }
}

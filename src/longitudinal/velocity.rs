//! longitudinal::velocity — observed versus expected growth velocity.
//!
//! Purpose
//! -------
//! Compare the regression slope of a series with the reference velocity
//! for the child's sex and age band, expressed as a velocity z-score,
//! percentile and status.
//!
//! Key behaviors
//! -------------
//! - Observed velocity is the OLS slope of value on age (units/month).
//! - The expected velocity covers the series' whole age span: each
//!   reference band's mean and sd is weighted by the share of
//!   [first age, last age] it covers. A series crossing from a fast early
//!   band into a slower one is held to the blend, not to either band.
//! - velocity z = (observed − expected mean) / sd; the percentile is
//!   Φ(z)·100 and the status uses the same thresholds as point-in-time
//!   z-scores.
//! - Weight-for-height series use the weight velocity table.
//!
//! Invariants & assumptions
//! ------------------------
//! - Two-point series are valid input.
//! - The age span lies inside the velocity table whenever every point lies
//!   inside the LMS tables; otherwise the reference error is propagated.
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{GrowthStatus, StatusThresholds},
    longitudinal::{
        errors::LongitudinalResult,
        regression::LinearFit,
        series::{GrowthDataPoint, validate_series},
    },
    reference::{Indicator, ReferenceStandards, Sex},
    statistical_tests::percentile_from_z,
};

/// Velocity of a series relative to the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityResult {
    pub indicator: Indicator,
    /// Observed slope, units per month.
    pub velocity: f64,
    pub expected_velocity: f64,
    pub expected_sd: f64,
    pub velocity_z: f64,
    /// Φ(velocity_z)·100.
    pub percentile_velocity: f64,
    pub status: GrowthStatus,
    pub message: String,
}

/// Compares observed slopes with the reference velocity tables.
#[derive(Debug, Clone, Copy)]
pub struct VelocityComparator<'a> {
    standards: &'a ReferenceStandards,
    thresholds: StatusThresholds,
}

impl<'a> VelocityComparator<'a> {
    pub fn new(standards: &'a ReferenceStandards, thresholds: StatusThresholds) -> VelocityComparator<'a> {
        VelocityComparator { standards, thresholds }
    }

    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    /// Fit the series and compare its slope with the expected velocity.
    ///
    /// Errors
    /// ------
    /// - Series validation errors (fewer than 2 points, non-finite values,
    ///   out of order, zero age span).
    /// - `Reference` when the age span leaves the velocity table.
    pub fn compare(
        &self, series: &[GrowthDataPoint], indicator: Indicator, sex: Sex,
    ) -> LongitudinalResult<VelocityResult> {
        validate_series(series, 2)?;
        let ages: Vec<f64> = series.iter().map(GrowthDataPoint::age).collect();
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let fit = LinearFit::ols(&ages, &values)?;
        let (start_age, end_age) = age_span(series);
        self.compare_slope(fit.slope, indicator, sex, start_age, end_age)
    }

    /// Compare an already-fitted slope with the expected velocity over
    /// `[start_age, end_age]` months.
    pub fn compare_slope(
        &self, velocity: f64, indicator: Indicator, sex: Sex, start_age: f64, end_age: f64,
    ) -> LongitudinalResult<VelocityResult> {
        let band = self.standards.expected_velocity_over(indicator, sex, start_age, end_age)?;
        let velocity_z = (velocity - band.mean) / band.sd;
        let percentile_velocity = percentile_from_z(velocity_z);
        let status = self.thresholds.status_for(velocity_z);
        let message = velocity_message(indicator, velocity, band.mean, percentile_velocity, status, velocity_z);
        Ok(VelocityResult {
            indicator,
            velocity,
            expected_velocity: band.mean,
            expected_sd: band.sd,
            velocity_z,
            percentile_velocity,
            status,
            message,
        })
    }
}

/// First and last age of an ordered series.
pub(crate) fn age_span(series: &[GrowthDataPoint]) -> (f64, f64) {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.age(), last.age()),
        _ => (0.0, 0.0),
    }
}

fn velocity_message(
    indicator: Indicator, velocity: f64, expected: f64, percentile: f64, status: GrowthStatus, z: f64,
) -> String {
    let unit = indicator.velocity_source().unit();
    let side = if z < 0.0 { "below" } else { "above" };
    match status {
        GrowthStatus::Normal => format!(
            "Growth velocity of {velocity:.2} {unit}/month is within the expected range (expected {expected:.2} {unit}/month)."
        ),
        GrowthStatus::Warning => format!(
            "Growth velocity of {velocity:.2} {unit}/month is {side} expected ({expected:.2} {unit}/month, {percentile:.1}th percentile). Monitor closely."
        ),
        GrowthStatus::Alert => format!(
            "Growth velocity of {velocity:.2} {unit}/month is far {side} expected ({expected:.2} {unit}/month, {percentile:.1}th percentile). Clinical review recommended."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Velocity z/percentile/status against the bundled tables.
    // - Two-point series and span-weighted band blending.
    // - Weight-for-height sharing the weight table.
    // -------------------------------------------------------------------------

    fn series(start_age: u32, values: &[f64]) -> Vec<GrowthDataPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let date = start + chrono::Months::new(i as u32);
                GrowthDataPoint::new(date, start_age + i as u32, value, 0.0, GrowthStatus::Normal)
            })
            .collect()
    }

    #[test]
    // Purpose
    // -------
    // A slope equal to the reference mean sits at the 50th percentile.
    //
    // Given
    // -----
    // - Boys' weight from 7 to 10 months gaining 0.30 kg/month (band 6–12:
    //   mean 0.30, sd 0.10).
    //
    // Expect
    // ------
    // - velocity_z ≈ 0, percentile ≈ 50, Normal.
    fn expected_slope_is_median_velocity() {
        // Arrange
        let standards = ReferenceStandards::who().unwrap();
        let comparator = VelocityComparator::new(&standards, StatusThresholds::default());
        let points = series(7, &[8.3, 8.6, 8.9, 9.2]);

        // Act
        let result = comparator.compare(&points, Indicator::WeightForAge, Sex::Male).unwrap();

        // Assert
        assert_relative_eq!(result.velocity, 0.30, epsilon = 1e-9);
        assert_relative_eq!(result.expected_velocity, 0.30, epsilon = 1e-12);
        assert_relative_eq!(result.expected_sd, 0.10, epsilon = 1e-12);
        assert_relative_eq!(result.percentile_velocity, 50.0, epsilon = 1e-6);
        assert_eq!(result.status, GrowthStatus::Normal);
        assert!(result.message.contains("kg/month"));
    }

    #[test]
    // Purpose
    // -------
    // Two-point series never fail and slow gain is flagged.
    //
    // Given
    // -----
    // - Girls' height at 8 and 9 months gaining 0.5 cm (band 6–12: mean
    //   1.35, sd 0.30).
    //
    // Expect
    // ------
    // - velocity_z = (0.5 − 1.35) / 0.3 ≈ −2.83 → Warning, below.
    fn two_point_series_flags_slow_gain() {
        // Arrange
        let standards = ReferenceStandards::who().unwrap();
        let comparator = VelocityComparator::new(&standards, StatusThresholds::default());
        let points = series(8, &[68.7, 69.2]);

        // Act
        let result = comparator.compare(&points, Indicator::HeightForAge, Sex::Female).unwrap();

        // Assert
        assert_relative_eq!(result.velocity_z, (0.5 - 1.35) / 0.3, epsilon = 1e-9);
        assert_eq!(result.status, GrowthStatus::Warning);
        assert!(result.message.contains("below"));
    }

    #[test]
    fn weight_for_height_uses_weight_band() {
        let standards = ReferenceStandards::who().unwrap();
        let comparator = VelocityComparator::new(&standards, StatusThresholds::default());
        let result = comparator.compare_slope(0.2, Indicator::WeightForHeight, Sex::Female, 15.0, 21.0).unwrap();
        assert_relative_eq!(result.expected_velocity, 0.21, epsilon = 1e-12);
        assert!(comparator.compare(&series(3, &[6.0]), Indicator::WeightForAge, Sex::Female).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Median growth across band edges is scored against the blended
    // reference, not a single band.
    //
    // Given
    // -----
    // - Boys' length-for-age medians at 0..=12 months (OLS slope ≈ 1.989).
    //   Bands: [0, 3) 3.6 ± 0.6, [3, 6) 2.1 ± 0.45, [6, 12) 1.3 ± 0.3.
    // - Boys' weight-for-age medians at 4..=8 months (slope ≈ 0.401),
    //   half in [3, 6) 0.58 ± 0.15 and half in [6, 12) 0.30 ± 0.10.
    //
    // Expect
    // ------
    // - Length: expected 2.075, sd 0.4125, velocity z ≈ −0.21, Normal.
    // - Weight: expected 0.44, sd 0.125, velocity z ≈ −0.31, Normal.
    fn median_growth_across_bands_is_normal() {
        // Arrange
        let standards = ReferenceStandards::who().unwrap();
        let comparator = VelocityComparator::new(&standards, StatusThresholds::default());
        let length = series(0, &[
            49.8842, 54.7244, 58.4249, 61.4292, 63.8860, 65.9026, 67.6236, 69.1645, 70.5994, 71.9687, 73.2812,
            74.5388, 75.7488,
        ]);
        let weight = series(4, &[7.0023, 7.5105, 7.9340, 8.2970, 8.6151]);

        // Act
        let length_velocity = comparator.compare(&length, Indicator::HeightForAge, Sex::Male).unwrap();
        let weight_velocity = comparator.compare(&weight, Indicator::WeightForAge, Sex::Male).unwrap();

        // Assert
        assert_relative_eq!(length_velocity.expected_velocity, 2.075, epsilon = 1e-12);
        assert_relative_eq!(length_velocity.expected_sd, 0.4125, epsilon = 1e-12);
        assert_relative_eq!(length_velocity.velocity_z, -0.2086, epsilon = 1e-3);
        assert_eq!(length_velocity.status, GrowthStatus::Normal);
        assert_relative_eq!(weight_velocity.expected_velocity, 0.44, epsilon = 1e-12);
        assert_relative_eq!(weight_velocity.velocity_z, -0.3103, epsilon = 1e-3);
        assert_eq!(weight_velocity.status, GrowthStatus::Normal);
    }
}

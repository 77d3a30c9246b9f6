//! Growth series: persisted per-visit results and their ordering checks.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{GrowthStatus, ZScoreResult},
    longitudinal::errors::{LongitudinalError, LongitudinalResult},
};

/// One assessed visit for a single indicator.
///
/// Points are immutable once recorded; a correction is a new point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthDataPoint {
    pub date: NaiveDate,
    pub age_in_months: u32,
    pub value: f64,
    pub z_score: f64,
    pub status: GrowthStatus,
}

impl GrowthDataPoint {
    pub fn new(
        date: NaiveDate, age_in_months: u32, value: f64, z_score: f64, status: GrowthStatus,
    ) -> GrowthDataPoint {
        GrowthDataPoint { date, age_in_months, value, z_score, status }
    }

    /// Record the outcome of a point-in-time assessment.
    pub fn from_assessment(
        date: NaiveDate, age_in_months: u32, value: f64, result: &ZScoreResult,
    ) -> GrowthDataPoint {
        GrowthDataPoint { date, age_in_months, value, z_score: result.z_score, status: result.status }
    }

    #[inline]
    pub(crate) fn age(&self) -> f64 {
        self.age_in_months as f64
    }
}

/// Check that a series can be analyzed.
///
/// Errors
/// ------
/// - `InsufficientData` when fewer than `min_points` points.
/// - `NonFiniteValue` for a NaN/±∞ value or z-score.
/// - `OutOfOrder` when a date or an age decreases.
/// - `ZeroAgeSpan` when at least two points all share one age.
pub fn validate_series(points: &[GrowthDataPoint], min_points: usize) -> LongitudinalResult<()> {
    if points.len() < min_points {
        return Err(LongitudinalError::InsufficientData { required: min_points, actual: points.len() });
    }
    for (index, point) in points.iter().enumerate() {
        for value in [point.value, point.z_score] {
            if !value.is_finite() {
                return Err(LongitudinalError::NonFiniteValue { index, value });
            }
        }
    }
    if let Some(pos) = points
        .windows(2)
        .position(|w| w[1].date < w[0].date || w[1].age_in_months < w[0].age_in_months)
    {
        return Err(LongitudinalError::OutOfOrder { index: pos + 1 });
    }
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() > 1 && first.age_in_months == last.age_in_months {
            return Err(LongitudinalError::ZeroAgeSpan { age_months: first.age_in_months });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, age: u32, value: f64) -> GrowthDataPoint {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        GrowthDataPoint::new(date, age, value, 0.0, GrowthStatus::Normal)
    }

    #[test]
    // Purpose
    // -------
    // Each structural defect maps to its own error.
    //
    // Given
    // -----
    // - A one-point series, a NaN value, a date going backwards and two
    //   points at the same age.
    //
    // Expect
    // ------
    // - InsufficientData, NonFiniteValue, OutOfOrder, ZeroAgeSpan.
    fn validate_series_reports_each_defect() {
        // Arrange
        let single = [point(1, 3, 6.0)];
        let nan = [point(1, 3, 6.0), point(2, 4, f64::NAN)];
        let backwards = [point(1, 3, 6.0), point(5, 4, 6.2), point(3, 5, 6.4)];
        let flat_age = [point(1, 3, 6.0), point(9, 3, 6.1)];

        // Act / Assert
        assert_eq!(
            validate_series(&single, 2),
            Err(LongitudinalError::InsufficientData { required: 2, actual: 1 })
        );
        assert!(matches!(validate_series(&nan, 2), Err(LongitudinalError::NonFiniteValue { index: 1, .. })));
        assert_eq!(validate_series(&backwards, 2), Err(LongitudinalError::OutOfOrder { index: 2 }));
        assert_eq!(validate_series(&flat_age, 2), Err(LongitudinalError::ZeroAgeSpan { age_months: 3 }));
        assert!(validate_series(&[point(1, 3, 6.0), point(20, 4, 6.5)], 2).is_ok());
    }
}

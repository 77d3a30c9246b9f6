//! longitudinal::faltering — cross-indicator growth-faltering detection.
//!
//! Purpose
//! -------
//! Look at weight and height together and flag the patterns that single
//! indicators miss: weight loss while length is preserved (wasting),
//! stalled gain in both (stunting risk), and downward crossing of centile
//! bands.
//!
//! Key behaviors
//! -------------
//! - Alignment: the common ages are the weight-series ages that fall inside
//!   the height series' age span. Height value and z-score are linearly
//!   interpolated at each common age.
//! - Each aligned series goes through [`TrendAnalyzer`]; the height series
//!   also gets a velocity comparison.
//! - Rules:
//!   * [`FalteringRule::WeightLossWithPreservedHeight`]: weight Decreasing,
//!     height Stable or Increasing.
//!   * [`FalteringRule::GrowthStagnation`]: neither series Increasing and
//!     height velocity below expected (percentile under the cut-off, or a
//!     non-Normal velocity status on the low side).
//!   * [`FalteringRule::WeightZScoreDecline`] /
//!     [`FalteringRule::HeightZScoreDecline`]: z dropped by more than
//!     `z_decline` from the first to the last aligned point.
//! - Severity: one rule → Mild (Moderate if its series has High
//!   significance); several → Moderate (Severe if any has High
//!   significance).
//!
//! Invariants & assumptions
//! ------------------------
//! - Fewer than `min_points` points in either series, or fewer than
//!   `min_points` aligned points, yields an insufficient-data result:
//!   `has_faltering = false`, severity None, `sufficient_data = false`.
//!   That is "cannot tell", not "no faltering".
//! - Malformed series (non-finite, out of order) are still errors.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    assessment::GrowthStatus,
    longitudinal::{
        errors::LongitudinalResult,
        options::FalteringOptions,
        series::{GrowthDataPoint, validate_series},
        trend::{Direction, Significance, TrendAnalyzer, TrendResult},
        velocity::VelocityResult,
    },
    reference::{Indicator, Sex},
};

/// A triggered faltering pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FalteringRule {
    WeightLossWithPreservedHeight,
    GrowthStagnation,
    WeightZScoreDecline,
    HeightZScoreDecline,
}

impl FalteringRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            FalteringRule::WeightLossWithPreservedHeight => "WeightLossWithPreservedHeight",
            FalteringRule::GrowthStagnation => "GrowthStagnation",
            FalteringRule::WeightZScoreDecline => "WeightZScoreDecline",
            FalteringRule::HeightZScoreDecline => "HeightZScoreDecline",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            FalteringRule::WeightLossWithPreservedHeight => {
                "Weight is falling while length is maintained (possible wasting). Assess feeding, recent illness and weight-for-height."
            }
            FalteringRule::GrowthStagnation => {
                "Weight and length gain have stalled below expected velocity (stunting risk). Review dietary intake and screen for chronic illness."
            }
            FalteringRule::WeightZScoreDecline => {
                "Weight-for-age has crossed down more than one major centile band. Confirm with a repeat measurement and review feeding."
            }
            FalteringRule::HeightZScoreDecline => {
                "Height-for-age has crossed down more than one major centile band. Plan a repeat length measurement and evaluate for chronic undernutrition."
            }
        }
    }
}

impl std::fmt::Display for FalteringRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

const COMBINED_RECOMMENDATION: &str =
    "Multiple faltering signals are present. Refer for a comprehensive nutritional assessment.";

/// Outcome of faltering detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalteringResult {
    pub has_faltering: bool,
    pub severity: Severity,
    pub indicators: Vec<FalteringRule>,
    pub recommendations: Vec<String>,
    /// False when the series were too short to evaluate.
    pub sufficient_data: bool,
    pub aligned_points: usize,
}

impl FalteringResult {
    fn insufficient(aligned_points: usize) -> FalteringResult {
        FalteringResult {
            has_faltering: false,
            severity: Severity::None,
            indicators: Vec::new(),
            recommendations: Vec::new(),
            sufficient_data: false,
            aligned_points,
        }
    }
}

/// Weight and height series resampled onto common ages.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub weight: Vec<GrowthDataPoint>,
    pub height: Vec<GrowthDataPoint>,
}

/// Align a height series onto the weight series' ages.
///
/// Weight points outside the height series' age span are dropped. Height
/// value and z are interpolated linearly in age; the interpolated status is
/// recomputed from the interpolated z by `status_for`.
pub fn align(
    weight: &[GrowthDataPoint], height: &[GrowthDataPoint], status_for: impl Fn(f64) -> GrowthStatus,
) -> AlignedSeries {
    let (Some(h_first), Some(h_last)) = (height.first(), height.last()) else {
        return AlignedSeries { weight: Vec::new(), height: Vec::new() };
    };
    let (lo, hi) = (h_first.age(), h_last.age());

    let mut aligned = AlignedSeries { weight: Vec::new(), height: Vec::new() };
    for w in weight.iter().filter(|w| w.age() >= lo && w.age() <= hi) {
        let age = w.age();
        let idx = height.partition_point(|h| h.age() < age);
        let (value, z_score) = match height.get(idx) {
            Some(h) if h.age() == age => (h.value, h.z_score),
            Some(upper) if idx > 0 => {
                let lower = height[idx - 1];
                let t = (age - lower.age()) / (upper.age() - lower.age());
                (
                    lower.value + (upper.value - lower.value) * t,
                    lower.z_score + (upper.z_score - lower.z_score) * t,
                )
            }
            _ => continue,
        };
        aligned.weight.push(*w);
        aligned.height.push(GrowthDataPoint::new(w.date, w.age_in_months, value, z_score, status_for(z_score)));
    }
    aligned
}

/// Cross-indicator faltering detector.
#[derive(Debug, Clone, Copy)]
pub struct FalteringDetector<'a> {
    analyzer: TrendAnalyzer<'a>,
    options: FalteringOptions,
}

impl<'a> FalteringDetector<'a> {
    pub fn new(analyzer: TrendAnalyzer<'a>, options: FalteringOptions) -> FalteringDetector<'a> {
        FalteringDetector { analyzer, options }
    }

    /// Detect faltering from a weight and a height series of one child.
    ///
    /// Errors
    /// ------
    /// - Series validation errors for malformed input (non-finite values,
    ///   out-of-order points, zero age span).
    /// - `Reference` when the velocity tables do not cover the series.
    pub fn detect(
        &self, weight: &[GrowthDataPoint], height: &[GrowthDataPoint], sex: Sex,
    ) -> LongitudinalResult<FalteringResult> {
        let min = self.options.min_points;
        if weight.len() < min || height.len() < min {
            debug!("faltering: insufficient data ({} weight, {} height points)", weight.len(), height.len());
            return Ok(FalteringResult::insufficient(0));
        }
        validate_series(weight, min)?;
        validate_series(height, min)?;

        let thresholds = *self.analyzer.comparator().thresholds();
        let aligned = align(weight, height, |z| thresholds.status_for(z));
        let n = aligned.weight.len();
        let distinct_span = match (aligned.weight.first(), aligned.weight.last()) {
            (Some(first), Some(last)) => last.age_in_months > first.age_in_months,
            _ => false,
        };
        if n < min || !distinct_span {
            debug!("faltering: only {n} aligned points");
            return Ok(FalteringResult::insufficient(n));
        }

        let weight_trend = self.analyzer.analyze(&aligned.weight, Indicator::WeightForAge, sex)?;
        let (height_trend, height_velocity) =
            self.analyzer.analyze_with_velocity(&aligned.height, Indicator::HeightForAge, sex)?;

        let fired = self.evaluate_rules(&aligned, &weight_trend, &height_trend, &height_velocity);
        let severity = severity(&fired);
        let indicators: Vec<FalteringRule> = fired.iter().map(|(rule, _)| *rule).collect();
        let mut recommendations: Vec<String> =
            indicators.iter().map(|rule| rule.recommendation().to_string()).collect();
        if indicators.len() >= 2 {
            recommendations.push(COMBINED_RECOMMENDATION.to_string());
        }

        debug!("faltering: {n} aligned points, rules = {indicators:?}, severity = {severity:?}");
        Ok(FalteringResult {
            has_faltering: !indicators.is_empty(),
            severity,
            indicators,
            recommendations,
            sufficient_data: true,
            aligned_points: n,
        })
    }

    /// Triggered rules, each paired with the significance of the series
    /// that triggered it.
    fn evaluate_rules(
        &self, aligned: &AlignedSeries, weight: &TrendResult, height: &TrendResult,
        height_velocity: &VelocityResult,
    ) -> Vec<(FalteringRule, Significance)> {
        let mut fired = Vec::new();

        if weight.direction == Direction::Decreasing && height.direction != Direction::Decreasing {
            fired.push((FalteringRule::WeightLossWithPreservedHeight, weight.significance));
        }

        let below_expected = height_velocity.velocity < height_velocity.expected_velocity
            && (height_velocity.status != GrowthStatus::Normal
                || height_velocity.percentile_velocity < self.options.velocity_percentile_cutoff);
        if weight.direction != Direction::Increasing
            && height.direction != Direction::Increasing
            && below_expected
        {
            fired.push((FalteringRule::GrowthStagnation, height.significance.max(weight.significance)));
        }

        if z_decline(&aligned.weight) > self.options.z_decline {
            fired.push((FalteringRule::WeightZScoreDecline, weight.significance));
        }
        if z_decline(&aligned.height) > self.options.z_decline {
            fired.push((FalteringRule::HeightZScoreDecline, height.significance));
        }

        debug!(
            "faltering rules: weight {:?}/{:?}, height {:?}/{:?}, height velocity pct {:.1} -> {} fired",
            weight.direction,
            weight.significance,
            height.direction,
            height.significance,
            height_velocity.percentile_velocity,
            fired.len()
        );
        fired
    }
}

fn z_decline(series: &[GrowthDataPoint]) -> f64 {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => first.z_score - last.z_score,
        _ => 0.0,
    }
}

fn severity(fired: &[(FalteringRule, Significance)]) -> Severity {
    let any_high = fired.iter().any(|(_, s)| *s == Significance::High);
    match (fired.len(), any_high) {
        (0, _) => Severity::None,
        (1, false) => Severity::Mild,
        (1, true) => Severity::Moderate,
        (_, false) => Severity::Moderate,
        (_, true) => Severity::Severe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assessment::StatusThresholds,
        longitudinal::{options::TrendOptions, velocity::VelocityComparator},
        reference::ReferenceStandards,
    };
    use approx::assert_relative_eq;
    use chrono::{Days, NaiveDate};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Alignment with interpolation and span clipping.
    // - The insufficient-data path.
    // - Rule firing on a wasting pattern and on stagnation.
    // - Severity bucketing.
    //
    // They intentionally DO NOT cover:
    // - Trend statistics themselves (see `longitudinal::trend`).
    // -------------------------------------------------------------------------

    fn point(age: u32, value: f64, z: f64) -> GrowthDataPoint {
        let birth = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let date = birth + Days::new(age as u64 * 30 + 1);
        GrowthDataPoint::new(date, age, value, z, GrowthStatus::Normal)
    }

    fn detect(weight: &[GrowthDataPoint], height: &[GrowthDataPoint]) -> FalteringResult {
        let standards = ReferenceStandards::who().unwrap();
        let analyzer = TrendAnalyzer::new(
            VelocityComparator::new(&standards, StatusThresholds::default()),
            TrendOptions::default(),
        );
        FalteringDetector::new(analyzer, FalteringOptions::default())
            .detect(weight, height, Sex::Male)
            .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Weight ages outside the height span are dropped; inside, height is
    // interpolated.
    //
    // Given
    // -----
    // - Weight at 2, 4, 5, 8 months; height at 3 (60 cm) and 6 (66 cm).
    //
    // Expect
    // ------
    // - Common ages 4 and 5 with heights 62 and 64.
    fn align_clips_and_interpolates() {
        // Arrange
        let weight = [point(2, 5.5, 0.0), point(4, 6.5, 0.0), point(5, 7.0, 0.0), point(8, 8.4, 0.0)];
        let height = [point(3, 60.0, -1.0), point(6, 66.0, 0.5)];

        // Act
        let aligned = align(&weight, &height, |z| StatusThresholds::default().status_for(z));

        // Assert
        let ages: Vec<u32> = aligned.height.iter().map(|p| p.age_in_months).collect();
        assert_eq!(ages, vec![4, 5]);
        assert_relative_eq!(aligned.height[0].value, 62.0, epsilon = 1e-12);
        assert_relative_eq!(aligned.height[1].value, 64.0, epsilon = 1e-12);
        assert_relative_eq!(aligned.height[0].z_score, -0.5, epsilon = 1e-12);
        assert_eq!(aligned.weight[0].value, 6.5);
    }

    #[test]
    // Purpose
    // -------
    // Short series are "cannot tell", not "no faltering".
    //
    // Given
    // -----
    // - Two weight points and four height points.
    //
    // Expect
    // ------
    // - has_faltering false, severity None, sufficient_data false.
    fn short_series_is_insufficient() {
        // Arrange
        let weight = [point(8, 7.5, -1.0), point(9, 7.3, -1.5)];
        let height = [point(8, 67.0, -1.6), point(9, 68.0, -1.6), point(10, 69.0, -1.7), point(11, 70.0, -1.9)];

        // Act
        let result = detect(&weight, &height);

        // Assert
        assert!(!result.has_faltering);
        assert_eq!(result.severity, Severity::None);
        assert!(result.indicators.is_empty());
        assert!(!result.sufficient_data);
    }

    #[test]
    // Purpose
    // -------
    // Steady weight loss with growing length is flagged as wasting.
    //
    // Given
    // -----
    // - Weight 7.5, 7.3, 7.0, 6.8 kg and height 67–70 cm at 8–11 months,
    //   with flat z-scores.
    //
    // Expect
    // ------
    // - WeightLossWithPreservedHeight only; the weight slope is highly
    //   significant, so severity is Moderate.
    fn weight_loss_with_growing_length_is_wasting() {
        // Arrange
        let weight: Vec<_> = [7.5, 7.3, 7.0, 6.8].iter().zip(8..).map(|(&w, a)| point(a, w, -1.0)).collect();
        let height: Vec<_> = [67.0, 68.0, 69.0, 70.0].iter().zip(8..).map(|(&h, a)| point(a, h, -1.6)).collect();

        // Act
        let result = detect(&weight, &height);

        // Assert
        assert!(result.has_faltering);
        assert!(result.sufficient_data);
        assert_eq!(result.aligned_points, 4);
        assert_eq!(result.indicators, vec![FalteringRule::WeightLossWithPreservedHeight]);
        assert_eq!(result.severity, Severity::Moderate);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Flat weight and near-flat length with falling z-scores trigger
    // stagnation and both z-decline rules.
    //
    // Given
    // -----
    // - Weight 9.0 kg throughout, height +0.03 cm/month at 12–15 months,
    //   weight z −0.5 → −1.4, height z −0.5 → −1.3.
    //
    // Expect
    // ------
    // - GrowthStagnation, WeightZScoreDecline, HeightZScoreDecline; severity
    //   Moderate or worse; a combined recommendation is appended.
    fn stagnation_and_centile_crossing() {
        // Arrange
        let weight = [point(12, 9.0, -0.5), point(13, 9.0, -0.8), point(14, 9.0, -1.1), point(15, 9.0, -1.4)];
        let height =
            [point(12, 75.0, -0.5), point(13, 75.03, -0.8), point(14, 75.06, -1.05), point(15, 75.09, -1.3)];

        // Act
        let result = detect(&weight, &height);

        // Assert
        assert!(result.indicators.contains(&FalteringRule::GrowthStagnation));
        assert!(result.indicators.contains(&FalteringRule::WeightZScoreDecline));
        assert!(result.indicators.contains(&FalteringRule::HeightZScoreDecline));
        assert!(!result.indicators.contains(&FalteringRule::WeightLossWithPreservedHeight));
        assert!(result.severity >= Severity::Moderate);
        assert_eq!(result.recommendations.len(), result.indicators.len() + 1);
        assert_eq!(result.recommendations.last().unwrap(), COMBINED_RECOMMENDATION);
    }

    #[test]
    fn severity_buckets() {
        use FalteringRule::*;
        assert_eq!(severity(&[]), Severity::None);
        assert_eq!(severity(&[(GrowthStagnation, Significance::Low)]), Severity::Mild);
        assert_eq!(severity(&[(GrowthStagnation, Significance::High)]), Severity::Moderate);
        assert_eq!(
            severity(&[(GrowthStagnation, Significance::None), (WeightZScoreDecline, Significance::Moderate)]),
            Severity::Moderate
        );
        assert_eq!(
            severity(&[(GrowthStagnation, Significance::High), (WeightZScoreDecline, Significance::None)]),
            Severity::Severe
        );
    }
}

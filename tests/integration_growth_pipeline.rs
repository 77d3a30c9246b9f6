//! Integration tests for the growth-assessment pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow a calling application follows: dates to
//!   completed-month age, plausibility validation, point-in-time z-scores and
//!   BMI, persisted series points, then trend, velocity and faltering
//!   analysis over those points.
//! - Use the bundled WHO tables with realistic measurements rather than
//!   hand-picked parameters.
//!
//! Coverage
//! --------
//! - `engine::GrowthEngine` as the single entry point.
//! - `assessment`: age, validation, `assess_all`, BMI-for-age, overall
//!   classification, unsupported-range errors.
//! - `longitudinal`: recorded points feeding trend, velocity and faltering.
//! - `reference`: substituting a small JSON fixture for the WHO tables.
//!
//! Exclusions
//! ----------
//! - Numerical details of the LMS transform, OLS and the t-test; these are
//!   covered by unit tests next to each module.
//! - Python bindings.
use chrono::{Months, NaiveDate};
use growth_analytics::{
    assessment::{AssessmentError, Color, GrowthStatus, MeasurementField},
    engine::GrowthEngine,
    longitudinal::{Direction, FalteringRule, GrowthDataPoint, RiskLevel, Severity},
    reference::{Indicator, ReferenceStandards, Sex},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Purpose
/// -------
/// Record one indicator's monthly measurements as persisted series points.
///
/// Parameters
/// ----------
/// - `engine`: engine used to assess each value.
/// - `indicator`: an age-tabulated indicator.
/// - `birth`: birth date; visit `i` happens `start_age + i` months later.
/// - `values`: one measurement per monthly visit.
fn record_monthly(
    engine: &GrowthEngine<'_>, indicator: Indicator, birth: NaiveDate, start_age: u32, values: &[f64],
) -> Vec<GrowthDataPoint> {
    values
        .iter()
        .zip(start_age..)
        .map(|(&value, age)| {
            let visit = birth + Months::new(age);
            engine
                .record(indicator, Sex::Male, visit, age, age as f64, value)
                .expect("values inside the reference range")
        })
        .collect()
}

#[test]
// Purpose
// -------
// A typical visit for a median-sized 6-month-old boy.
//
// Given
// -----
// - Birth 2023-01-15, visit 2023-07-20, 7.9 kg, 67.6 cm.
//
// Expect
// ------
// - Age 6 months, a valid report, Normal status on every indicator, a
//   BMI near 17.3 and an overall Green classification.
fn visit_pipeline_for_median_child() {
    // Arrange
    let standards = ReferenceStandards::who().expect("bundled tables are complete");
    let engine = GrowthEngine::with_defaults(&standards);

    // Act
    let age = engine.age_in_months(date(2023, 1, 15), date(2023, 7, 20)).unwrap();
    let report = engine.validate(7.9, 67.6, None, age);
    let all = engine.assess_all(7.9, 67.6, None, age, Sex::Male).unwrap();
    let bmi = engine.bmi_for_age(7.9, 67.6, age, Sex::Male).unwrap();
    let overall = engine.classify_overall(&all);

    // Assert
    assert_eq!(age, 6);
    assert!(report.is_valid);
    assert!(all.iter().all(|r| r.status == GrowthStatus::Normal));
    assert!(all.head_circumference_for_age.is_none());
    assert!((bmi.bmi - 17.29).abs() < 0.01);
    assert_eq!(bmi.status, GrowthStatus::Normal);
    assert_eq!(overall.color, Color::Green);
}

#[test]
// Purpose
// -------
// Validation failures are reported as data, all at once.
//
// Given
// -----
// - Weight 0 kg and height 70 cm at 6 months; weight 3.5 kg and height
//   50 cm at birth.
//
// Expect
// ------
// - The first is invalid with a weight error only; the second is valid.
fn validation_reports_field_errors() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);

    // Act
    let bad = engine.validate(0.0, 70.0, None, 6);
    let good = engine.validate(3.5, 50.0, None, 0);

    // Assert
    assert!(!bad.is_valid);
    assert!(bad.has_error_for(MeasurementField::WeightKg));
    assert!(!bad.has_error_for(MeasurementField::HeightCm));
    assert!(good.is_valid && good.errors.is_empty());
}

#[test]
// Purpose
// -------
// Ages beyond the tables are an explicit error, not an extrapolation.
//
// Given
// -----
// - A 61-month-old (tables end at 60 months).
//
// Expect
// ------
// - `UnsupportedAgeRange` for weight-for-age.
fn assessment_beyond_reference_range_is_rejected() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);

    // Act
    let result = engine.assess_all(18.5, 110.0, None, 61, Sex::Female);

    // Assert
    match result {
        Err(AssessmentError::UnsupportedAgeRange { indicator, max, .. }) => {
            assert_eq!(indicator, Indicator::WeightForAge);
            assert_eq!(max, 60.0);
        }
        other => panic!("expected UnsupportedAgeRange, got {other:?}"),
    }
}

#[test]
// Purpose
// -------
// Healthy monthly gain at the expected velocity is low risk.
//
// Given
// -----
// - A boy gaining 0.3 kg/month from the 6-month median, the mean of the
//   6–12 month weight velocity band.
//
// Expect
// ------
// - Increasing direction, Normal velocity status near the 50th velocity
//   percentile, and Low risk.
fn steady_gain_at_expected_velocity_is_low_risk() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);
    let series = record_monthly(&engine, Indicator::WeightForAge, date(2023, 2, 1), 6, &[
        7.934, 8.234, 8.534, 8.834,
    ]);

    // Act
    let trend = engine.analyze_trend(&series, Indicator::WeightForAge, Sex::Male).unwrap();
    let velocity = engine.velocity(&series, Indicator::WeightForAge, Sex::Male).unwrap();

    // Assert
    assert_eq!(trend.direction, Direction::Increasing);
    assert_eq!(trend.risk_level, RiskLevel::Low);
    assert!((trend.consistency - 1.0).abs() < 1e-9);
    assert_eq!(velocity.status, GrowthStatus::Normal);
    assert!((velocity.percentile_velocity - 50.0).abs() < 1.0);
}

#[test]
// Purpose
// -------
// Median growth across a velocity band edge is held to the blended
// expectation, not to whichever band holds the mid-age.
//
// Given
// -----
// - Boys' median weights at 4–8 months, spanning the 3–6 and 6–12 month
//   weight bands (0.58 and 0.30 kg/month).
// - Boys' median lengths at 0–12 months, spanning the 0–3, 3–6 and 6–12
//   month length bands.
//
// Expect
// ------
// - Expected weight velocity of 0.44 kg/month (half of each band) and
//   expected length velocity of 2.075 cm/month.
// - Normal velocity status and Low trend risk for both series.
fn median_series_across_velocity_bands_is_normal() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);
    let birth = date(2022, 3, 10);
    let weight =
        record_monthly(&engine, Indicator::WeightForAge, birth, 4, &[7.0023, 7.5105, 7.9340, 8.2970, 8.6151]);
    let length = record_monthly(&engine, Indicator::HeightForAge, birth, 0, &[
        49.8842, 54.7244, 58.4249, 61.4292, 63.8860, 65.9026, 67.6236, 69.1645, 70.5994, 71.9687, 73.2812,
        74.5388, 75.7488,
    ]);

    // Act
    let weight_velocity = engine.velocity(&weight, Indicator::WeightForAge, Sex::Male).unwrap();
    let weight_trend = engine.analyze_trend(&weight, Indicator::WeightForAge, Sex::Male).unwrap();
    let length_velocity = engine.velocity(&length, Indicator::HeightForAge, Sex::Male).unwrap();
    let length_trend = engine.analyze_trend(&length, Indicator::HeightForAge, Sex::Male).unwrap();

    // Assert
    assert!((weight_velocity.expected_velocity - 0.44).abs() < 1e-9);
    assert_eq!(weight_velocity.status, GrowthStatus::Normal);
    assert_eq!(weight_trend.risk_level, RiskLevel::Low);
    assert!((length_velocity.expected_velocity - 2.075).abs() < 1e-9);
    assert_eq!(length_velocity.status, GrowthStatus::Normal);
    assert_eq!(length_trend.direction, Direction::Increasing);
    assert_eq!(length_trend.risk_level, RiskLevel::Low);
}

#[test]
// Purpose
// -------
// The sample faltering scenario: falling weight with rising length.
//
// Given
// -----
// - Weights 7.5, 7.3, 7.0, 6.8 kg and lengths 67, 68, 69, 70 cm for a boy
//   at 8–11 months, recorded through the engine.
//
// Expect
// ------
// - Faltering with the wasting rule and the weight centile-crossing rule;
//   the weight decline is highly significant, so severity is Severe.
fn weight_loss_with_rising_length_is_faltering() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);
    let birth = date(2023, 1, 5);
    let weight = record_monthly(&engine, Indicator::WeightForAge, birth, 8, &[7.5, 7.3, 7.0, 6.8]);
    let height = record_monthly(&engine, Indicator::HeightForAge, birth, 8, &[67.0, 68.0, 69.0, 70.0]);

    // Act
    let result = engine.detect_faltering(&weight, &height, Sex::Male).unwrap();

    // Assert
    assert!(result.has_faltering);
    assert!(result.sufficient_data);
    assert!(result.severity >= Severity::Mild);
    assert!(result.indicators.contains(&FalteringRule::WeightLossWithPreservedHeight));
    assert!(result.indicators.contains(&FalteringRule::WeightZScoreDecline));
    assert!(!result.indicators.contains(&FalteringRule::GrowthStagnation));
    assert_eq!(result.severity, Severity::Severe);
    assert!(!result.recommendations.is_empty());
}

#[test]
// Purpose
// -------
// Short series never report faltering, whatever the values.
//
// Given
// -----
// - Two-point weight and height series with a steep weight drop.
//
// Expect
// ------
// - No faltering, severity None, flagged as insufficient data; trend and
//   velocity on the same two points still succeed.
fn two_point_series_are_insufficient_for_faltering() {
    // Arrange
    let standards = ReferenceStandards::who().unwrap();
    let engine = GrowthEngine::with_defaults(&standards);
    let birth = date(2023, 1, 5);
    let weight = record_monthly(&engine, Indicator::WeightForAge, birth, 8, &[8.6, 7.6]);
    let height = record_monthly(&engine, Indicator::HeightForAge, birth, 8, &[70.6, 71.9]);

    // Act
    let result = engine.detect_faltering(&weight, &height, Sex::Male).unwrap();
    let trend = engine.analyze_trend(&weight, Indicator::WeightForAge, Sex::Male).unwrap();

    // Assert
    assert!(!result.has_faltering);
    assert_eq!(result.severity, Severity::None);
    assert!(result.indicators.is_empty());
    assert!(!result.sufficient_data);
    assert_eq!(trend.consistency, 1.0);
    assert!(trend.p_value.is_none());
}

#[test]
// Purpose
// -------
// A substitute reference document drives the same engine.
//
// Given
// -----
// - A fixture with two female length-for-age rows and one velocity band.
//
// Expect
// ------
// - The fixture median scores z = 0 and percentile 50; indicators missing
//   from the fixture are reference errors.
fn fixture_reference_tables_substitute_for_who() {
    // Arrange
    let doc = r#"{
        "lms": [
            {"indicator": "height_for_age", "sex": "female", "x": 0, "l": 1, "m": 49.1477, "s": 0.0379},
            {"indicator": "height_for_age", "sex": "female", "x": 1, "l": 1, "m": 53.6872, "s": 0.0364}
        ],
        "velocity": [
            {"indicator": "height_for_age", "sex": "female", "start_month": 0, "end_month": 3, "mean": 3.4, "sd": 0.6}
        ]
    }"#;
    let fixture = ReferenceStandards::from_json_str(doc).unwrap();
    let engine = GrowthEngine::with_defaults(&fixture);

    // Act
    let median = engine.assess(Indicator::HeightForAge, Sex::Female, 0.0, 49.1477).unwrap();
    let missing = engine.assess(Indicator::WeightForAge, Sex::Female, 0.0, 3.2);

    // Assert
    assert!(median.z_score.abs() < 1e-12);
    assert!((median.percentile - 50.0).abs() < 1e-9);
    assert!(matches!(missing, Err(AssessmentError::Reference(_))));
}

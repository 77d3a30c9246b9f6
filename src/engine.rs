//! engine — single entry point over the assessment and longitudinal layers.
//!
//! Purpose
//! -------
//! Give calling code (forms, dashboards, report generators) one object that
//! borrows the reference standards and a bundle of options, and exposes the
//! whole growth-assessment surface as plain method calls.
//!
//! Key behaviors
//! -------------
//! - Point-in-time: [`GrowthEngine::age_in_months`], [`GrowthEngine::validate`],
//!   [`GrowthEngine::assess_all`], [`GrowthEngine::classify`],
//!   [`GrowthEngine::bmi_for_age`].
//! - Longitudinal: [`GrowthEngine::analyze_trend`], [`GrowthEngine::velocity`],
//!   [`GrowthEngine::detect_faltering`].
//! - The engine is `Copy` and holds no mutable state; every call depends only
//!   on its arguments, so one engine can serve concurrent callers.
//!
//! Conventions
//! -----------
//! - Options are validated once when built; [`EngineOptions::default`]
//!   carries the clinical defaults (±2/±3 flags, WHO bounds, 3-point
//!   faltering minimum).
//!
//! Downstream usage
//! ----------------
//! ```
//! use growth_analytics::{engine::GrowthEngine, reference::{ReferenceStandards, Sex}};
//!
//! let standards = ReferenceStandards::who()?;
//! let engine = GrowthEngine::with_defaults(&standards);
//! let all = engine.assess_all(7.9, 67.6, None, 6, Sex::Male)?;
//! assert!(all.weight_for_age.z_score.abs() < 0.05);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{
        AllIndicators, AssessmentResult, BmiResult, Classification, MeasurementBounds, ValidationReport,
        ZScoreEngine, ZScoreOptions, ZScoreResult, age_in_months, classify, classify_indicator, overall,
        validate_dates, validate_measurement,
    },
    longitudinal::{
        FalteringDetector, FalteringOptions, FalteringResult, GrowthDataPoint, LongitudinalResult,
        TrendAnalyzer, TrendOptions, TrendResult, VelocityComparator, VelocityResult,
    },
    reference::{Indicator, ReferenceStandards, Sex},
};

/// Every tunable of the engine in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    pub zscore: ZScoreOptions,
    pub bounds: MeasurementBounds,
    pub trend: TrendOptions,
    pub faltering: FalteringOptions,
}

/// Growth-assessment façade over a borrowed reference set.
#[derive(Debug, Clone, Copy)]
pub struct GrowthEngine<'a> {
    standards: &'a ReferenceStandards,
    options: EngineOptions,
}

impl<'a> GrowthEngine<'a> {
    pub fn new(standards: &'a ReferenceStandards, options: EngineOptions) -> GrowthEngine<'a> {
        GrowthEngine { standards, options }
    }

    pub fn with_defaults(standards: &'a ReferenceStandards) -> GrowthEngine<'a> {
        GrowthEngine::new(standards, EngineOptions::default())
    }

    pub fn standards(&self) -> &'a ReferenceStandards {
        self.standards
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn zscore_engine(&self) -> ZScoreEngine<'a> {
        ZScoreEngine::new(self.standards, self.options.zscore)
    }

    pub fn velocity_comparator(&self) -> VelocityComparator<'a> {
        VelocityComparator::new(self.standards, self.options.zscore.thresholds)
    }

    pub fn trend_analyzer(&self) -> TrendAnalyzer<'a> {
        TrendAnalyzer::new(self.velocity_comparator(), self.options.trend)
    }

    pub fn faltering_detector(&self) -> FalteringDetector<'a> {
        FalteringDetector::new(self.trend_analyzer(), self.options.faltering)
    }

    // ---- point-in-time -----------------------------------------------------

    pub fn age_in_months(&self, birth: NaiveDate, observation: NaiveDate) -> AssessmentResult<u32> {
        age_in_months(birth, observation)
    }

    /// Range checks on one visit's measurements; never fails.
    pub fn validate(
        &self, weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, age_months: u32,
    ) -> ValidationReport {
        validate_measurement(weight_kg, height_cm, head_circumference_cm, age_months, &self.options.bounds)
    }

    /// Measurement checks plus date checks against `today`, in one report.
    ///
    /// The age used for the measurement checks is derived from the dates
    /// when they are ordered, and taken as 0 otherwise (the date issue is
    /// already reported).
    pub fn validate_visit(
        &self, weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, birth: NaiveDate,
        observation: NaiveDate, today: NaiveDate,
    ) -> ValidationReport {
        let age = age_in_months(birth, observation).unwrap_or(0);
        validate_dates(birth, observation, today).merge(self.validate(
            weight_kg,
            height_cm,
            head_circumference_cm,
            age,
        ))
    }

    pub fn assess(&self, indicator: Indicator, sex: Sex, x: f64, value: f64) -> AssessmentResult<ZScoreResult> {
        self.zscore_engine().assess(indicator, sex, x, value)
    }

    pub fn assess_all(
        &self, weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, age_months: u32,
        sex: Sex,
    ) -> AssessmentResult<AllIndicators> {
        self.zscore_engine().assess_all(weight_kg, height_cm, head_circumference_cm, age_months, sex)
    }

    pub fn classify(&self, z: f64) -> Classification {
        classify(z, &self.options.zscore.thresholds)
    }

    pub fn classify_indicator(&self, indicator: Indicator, z: f64) -> Classification {
        classify_indicator(indicator, z, &self.options.zscore.thresholds)
    }

    /// Composite classification of a full assessment (worst indicator wins).
    pub fn classify_overall(&self, results: &AllIndicators) -> Classification {
        overall(results)
    }

    pub fn bmi_for_age(
        &self, weight_kg: f64, height_cm: f64, age_months: u32, sex: Sex,
    ) -> AssessmentResult<BmiResult> {
        self.zscore_engine().bmi_for_age(weight_kg, height_cm, age_months, sex)
    }

    /// Value on the centile curve at `z`, for chart rendering.
    pub fn value_at_z(&self, indicator: Indicator, sex: Sex, x: f64, z: f64) -> AssessmentResult<f64> {
        self.zscore_engine().value_at_z(indicator, sex, x, z)
    }

    /// Assess one value and package it as a series point ready to persist.
    pub fn record(
        &self, indicator: Indicator, sex: Sex, date: NaiveDate, age_months: u32, x: f64, value: f64,
    ) -> AssessmentResult<GrowthDataPoint> {
        let result = self.assess(indicator, sex, x, value)?;
        Ok(GrowthDataPoint::from_assessment(date, age_months, value, &result))
    }

    // ---- longitudinal ------------------------------------------------------

    pub fn analyze_trend(
        &self, series: &[GrowthDataPoint], indicator: Indicator, sex: Sex,
    ) -> LongitudinalResult<TrendResult> {
        self.trend_analyzer().analyze(series, indicator, sex)
    }

    pub fn velocity(
        &self, series: &[GrowthDataPoint], indicator: Indicator, sex: Sex,
    ) -> LongitudinalResult<VelocityResult> {
        self.velocity_comparator().compare(series, indicator, sex)
    }

    pub fn detect_faltering(
        &self, weight_series: &[GrowthDataPoint], height_series: &[GrowthDataPoint], sex: Sex,
    ) -> LongitudinalResult<FalteringResult> {
        self.faltering_detector().detect(weight_series, height_series, sex)
    }
}

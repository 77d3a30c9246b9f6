//! assessment — point-in-time growth assessment.
//!
//! Purpose
//! -------
//! Everything needed to assess one visit: completed-month age, plausibility
//! validation, LMS z-scores and percentiles for every indicator, BMI-for-age,
//! and clinical classification.
//!
//! Key behaviors
//! -------------
//! - [`age_in_months`] counts completed calendar months.
//! - [`validate_measurement`] / [`validate_dates`] return a
//!   [`ValidationReport`]; they never fail.
//! - [`ZScoreEngine`] computes [`ZScoreResult`]s and [`BmiResult`]s against a
//!   borrowed [`ReferenceStandards`](crate::reference::ReferenceStandards).
//! - [`classify`], [`classify_indicator`] and [`overall`] turn z-scores into
//!   labelled, colored priorities.
//!
//! Invariants & assumptions
//! ------------------------
//! - Domain failures (age/height outside the tables, non-positive values)
//!   are [`AssessmentError`]s; they are never extrapolated or clamped.
//! - Option structs are validated at construction.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests; `tests/integration_growth_pipeline.rs`
//!   runs the full visit flow.
pub mod age;
pub mod bmi;
pub mod classifier;
pub mod errors;
pub mod measurement;
pub mod options;
pub mod status;
pub mod validation;
pub mod zscore;

pub use self::age::{age_in_days, age_in_months};
pub use self::bmi::{BmiResult, bmi};
pub use self::classifier::{Classification, Color, classify, classify_indicator, overall};
pub use self::errors::{AssessmentError, AssessmentResult};
pub use self::measurement::Measurement;
pub use self::options::{MeasurementBounds, StatusThresholds, ZScoreOptions};
pub use self::status::GrowthStatus;
pub use self::validation::{
    MeasurementField, ValidationIssue, ValidationReport, validate_dates, validate_measurement,
};
pub use self::zscore::{AllIndicators, ZScoreEngine, ZScoreResult};

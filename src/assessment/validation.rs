//! assessment::validation — plausibility checks on raw measurements.
//!
//! Purpose
//! -------
//! Catch data-entry errors before a measurement reaches the z-score engine.
//! Every violation is collected into a [`ValidationReport`]; validation
//! itself never fails, so callers can show all problems at once.
//!
//! Key behaviors
//! -------------
//! - Weight, height and (optional) head circumference must be finite and lie
//!   in `(0, max]`, upper bounds inclusive, with maxima taken from
//!   [`MeasurementBounds`].
//! - Age above `max_age_months` is reported against
//!   [`MeasurementField::AgeInMonths`].
//! - [`validate_dates`] checks observation ≤ today and observation ≥ birth.
//! - Reports merge, so measurement and date checks can be combined.
//!
//! Conventions
//! -----------
//! - Messages are user-facing sentences with units, e.g.
//!   "Weight must not exceed 50 kg".
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assessment::options::MeasurementBounds;

/// Input field a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementField {
    WeightKg,
    HeightCm,
    HeadCircumferenceCm,
    AgeInMonths,
    BirthDate,
    ObservationDate,
}

impl MeasurementField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementField::WeightKg => "weight_kg",
            MeasurementField::HeightCm => "height_cm",
            MeasurementField::HeadCircumferenceCm => "head_circumference_cm",
            MeasurementField::AgeInMonths => "age_in_months",
            MeasurementField::BirthDate => "birth_date",
            MeasurementField::ObservationDate => "observation_date",
        }
    }
}

impl std::fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: MeasurementField,
    pub message: String,
}

/// Outcome of validation: valid iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(errors: Vec<ValidationIssue>) -> ValidationReport {
        ValidationReport { is_valid: errors.is_empty(), errors }
    }

    /// Combine two reports; valid only if both are.
    pub fn merge(mut self, other: ValidationReport) -> ValidationReport {
        self.errors.extend(other.errors);
        ValidationReport::from_issues(self.errors)
    }

    pub fn has_error_for(&self, field: MeasurementField) -> bool {
        self.errors.iter().any(|issue| issue.field == field)
    }
}

fn check_range(
    issues: &mut Vec<ValidationIssue>, field: MeasurementField, label: &str, unit: &str, value: f64,
    max: f64,
) {
    let message = if !value.is_finite() {
        format!("{label} must be a finite number")
    } else if value <= 0.0 {
        format!("{label} must be greater than 0 {unit}")
    } else if value > max {
        format!("{label} must not exceed {max} {unit}")
    } else {
        return;
    };
    issues.push(ValidationIssue { field, message });
}

/// Check a raw measurement against the plausibility bounds.
///
/// Parameters
/// ----------
/// - `weight_kg`, `height_cm`: required, finite, in `(0, max]`.
/// - `head_circumference_cm`: optional; checked only when present.
/// - `age_months`: completed months; must not exceed `max_age_months`.
/// - `bounds`: upper limits, usually [`MeasurementBounds::default`].
///
/// Returns
/// -------
/// A [`ValidationReport`] listing every violation in field order.
///
/// Examples
/// --------
/// ```rust
/// # use growth_analytics::assessment::{validate_measurement, MeasurementBounds, MeasurementField};
/// let report = validate_measurement(0.0, 70.0, None, 6, &MeasurementBounds::default());
/// assert!(!report.is_valid);
/// assert!(report.has_error_for(MeasurementField::WeightKg));
///
/// let ok = validate_measurement(3.5, 50.0, None, 0, &MeasurementBounds::default());
/// assert!(ok.is_valid && ok.errors.is_empty());
/// ```
pub fn validate_measurement(
    weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, age_months: u32,
    bounds: &MeasurementBounds,
) -> ValidationReport {
    let mut issues = Vec::new();
    check_range(&mut issues, MeasurementField::WeightKg, "Weight", "kg", weight_kg, bounds.max_weight_kg);
    check_range(&mut issues, MeasurementField::HeightCm, "Height", "cm", height_cm, bounds.max_height_cm);
    if let Some(head) = head_circumference_cm {
        check_range(
            &mut issues,
            MeasurementField::HeadCircumferenceCm,
            "Head circumference",
            "cm",
            head,
            bounds.max_head_circumference_cm,
        );
    }
    if age_months > bounds.max_age_months {
        issues.push(ValidationIssue {
            field: MeasurementField::AgeInMonths,
            message: format!("Age must not exceed {} months", bounds.max_age_months),
        });
    }
    ValidationReport::from_issues(issues)
}

/// Check the dates of an observation.
///
/// `today` is passed in rather than read from the clock so results are
/// reproducible.
pub fn validate_dates(birth: NaiveDate, observation: NaiveDate, today: NaiveDate) -> ValidationReport {
    let mut issues = Vec::new();
    if observation > today {
        issues.push(ValidationIssue {
            field: MeasurementField::ObservationDate,
            message: format!("Observation date {observation} is in the future"),
        });
    }
    if observation < birth {
        issues.push(ValidationIssue {
            field: MeasurementField::ObservationDate,
            message: format!("Observation date {observation} is before birth date {birth}"),
        });
    }
    if birth > today {
        issues.push(ValidationIssue {
            field: MeasurementField::BirthDate,
            message: format!("Birth date {birth} is in the future"),
        });
    }
    ValidationReport::from_issues(issues)
}

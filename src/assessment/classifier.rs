//! assessment::classifier — clinical labels for z-scores.
//!
//! Purpose
//! -------
//! Map a z-score to a presentation-ready classification: a label, a traffic
//! light color and a numeric priority used for sorting and roll-ups.
//!
//! Key behaviors
//! -------------
//! - [`classify`] uses the generic bands: Normal (Green, 0), "Moderate
//!   deviation" (Amber, 1), "Severe deviation" (Red, 2).
//! - [`classify_indicator`] gives the WHO indicator-specific label
//!   (stunting, wasting, underweight, overweight, micro/macrocephaly risk)
//!   with the same color and priority as [`classify`].
//! - [`overall`] rolls several results up to the worst priority.
//!
//! Invariants & assumptions
//! ------------------------
//! - Priority is non-decreasing in |z| for any fixed thresholds.
//!
//! Testing notes
//! -------------
//! - Proptest checks the monotonicity invariant; unit tests pin the labels.
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{options::StatusThresholds, status::GrowthStatus, zscore::AllIndicators},
    reference::Indicator,
};

/// Traffic-light color of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green,
    Amber,
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Amber => "amber",
            Color::Red => "red",
        }
    }
}

/// Label, color and priority for one z-score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub classification: String,
    pub color: Color,
    pub priority: u8,
}

impl Classification {
    fn from_status(status: GrowthStatus, label: &str) -> Classification {
        let color = match status {
            GrowthStatus::Normal => Color::Green,
            GrowthStatus::Warning => Color::Amber,
            GrowthStatus::Alert => Color::Red,
        };
        Classification { classification: label.to_string(), color, priority: status.priority() }
    }
}

/// Generic classification of a z-score.
///
/// Examples
/// --------
/// ```rust
/// # use growth_analytics::assessment::{classify, Color, StatusThresholds};
/// let c = classify(-2.4, &StatusThresholds::default());
/// assert_eq!(c.classification, "Moderate deviation");
/// assert_eq!(c.color, Color::Amber);
/// assert_eq!(c.priority, 1);
/// ```
pub fn classify(z: f64, thresholds: &StatusThresholds) -> Classification {
    generic(thresholds.status_for(z))
}

fn generic(status: GrowthStatus) -> Classification {
    let label = match status {
        GrowthStatus::Normal => "Normal",
        GrowthStatus::Warning => "Moderate deviation",
        GrowthStatus::Alert => "Severe deviation",
    };
    Classification::from_status(status, label)
}

/// Indicator-specific clinical label for a z-score.
///
/// Above-median bands that carry no clinical concern for an indicator (tall
/// stature, high weight-for-age) are labelled but keep the generic priority.
pub fn classify_indicator(indicator: Indicator, z: f64, thresholds: &StatusThresholds) -> Classification {
    let status = thresholds.status_for(z);
    let low = z < 0.0;
    let label = match (indicator, status, low) {
        (_, GrowthStatus::Normal, _) => "Normal",

        (Indicator::WeightForAge, GrowthStatus::Warning, true) => "Underweight",
        (Indicator::WeightForAge, GrowthStatus::Alert, true) => "Severely underweight",
        (Indicator::WeightForAge, _, false) => "High weight-for-age",

        (Indicator::HeightForAge, GrowthStatus::Warning, true) => "Stunted",
        (Indicator::HeightForAge, GrowthStatus::Alert, true) => "Severely stunted",
        (Indicator::HeightForAge, _, false) => "Tall for age",

        (Indicator::WeightForHeight | Indicator::BmiForAge, GrowthStatus::Warning, true) => "Wasted",
        (Indicator::WeightForHeight | Indicator::BmiForAge, GrowthStatus::Alert, true) => {
            "Severe wasting"
        }
        (Indicator::WeightForHeight | Indicator::BmiForAge, GrowthStatus::Warning, false) => {
            "Possible risk of overweight"
        }
        (Indicator::WeightForHeight | Indicator::BmiForAge, GrowthStatus::Alert, false) => "Obese",

        (Indicator::HeadCircumferenceForAge, _, true) => "Microcephaly risk",
        (Indicator::HeadCircumferenceForAge, _, false) => "Macrocephaly risk",
    };
    Classification::from_status(status, label)
}

/// Worst classification across every present indicator.
///
/// Statuses were fixed when each result was computed, so no thresholds are
/// needed here.
pub fn overall(results: &AllIndicators) -> Classification {
    generic(results.worst_status())
}

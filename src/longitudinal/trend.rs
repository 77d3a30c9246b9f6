//! longitudinal::trend — direction, velocity, significance and risk of a series.
//!
//! Purpose
//! -------
//! Summarize an ordered series of assessed visits for one indicator: where
//! it is heading, how fast, whether that is distinguishable from noise, and
//! how worried a clinician should be.
//!
//! Key behaviors
//! -------------
//! - velocity = OLS slope of value on age in months; direction compares it
//!   with the indicator's noise threshold ε from [`TrendOptions`].
//! - acceleration = OLS slope of consecutive interval velocities against
//!   interval midpoints; 0 when fewer than two intervals exist.
//! - consistency = R² (1.0 for two points).
//! - significance = bucketed two-sided p-value of the slope t-test with
//!   n − 2 degrees of freedom; None for two points.
//! - risk level folds three signals into one ordinal score:
//!   2 × (worst point status) + (velocity status) + adverse direction,
//!   where a declining weight/height/head series scores 1, plus 1 more at
//!   Moderate or High significance. BMI decreasing is not adverse on its
//!   own. Scores map 0 → Low, 1–2 → Moderate, 3–4 → High, 5+ → Critical.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series are ordered by date; ages are non-decreasing and not all equal.
//! - consistency ∈ [0, 1]; p_value ∈ [0, 1] when present.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the two-point convention, direction thresholds,
//!   acceleration, significance on a strongly linear series, and the risk
//!   fold.
use serde::{Deserialize, Serialize};

use crate::{
    assessment::GrowthStatus,
    longitudinal::{
        errors::LongitudinalResult,
        options::TrendOptions,
        regression::LinearFit,
        series::{GrowthDataPoint, validate_series},
        velocity::{VelocityComparator, VelocityResult, age_span},
    },
    reference::{Indicator, Sex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
    Stable,
}

/// Strength of evidence that the slope is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    None,
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    fn from_score(score: u8) -> RiskLevel {
        match score {
            0 => RiskLevel::Low,
            1..=2 => RiskLevel::Moderate,
            3..=4 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Growth is tracking as expected. Continue routine monitoring.",
            RiskLevel::Moderate => {
                "Some deviation from the expected growth pattern. Re-measure at the next scheduled visit and review feeding practices."
            }
            RiskLevel::High => {
                "Growth pattern is concerning. Schedule a follow-up within 2 to 4 weeks and assess nutrition and recent illness."
            }
            RiskLevel::Critical => {
                "Growth pattern indicates serious risk. Refer for clinical evaluation promptly."
            }
        }
    }
}

/// Summary of a growth series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub indicator: Indicator,
    pub direction: Direction,
    /// Units per month.
    pub velocity: f64,
    /// Units per month².
    pub acceleration: f64,
    /// R² of the linear fit, in [0, 1].
    pub consistency: f64,
    pub significance: Significance,
    pub risk_level: RiskLevel,
    pub recommendation: String,
    /// Two-sided slope p-value; `None` for two-point series.
    pub p_value: Option<f64>,
    pub points: usize,
}

/// Trend analysis over a borrowed reference set.
#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer<'a> {
    comparator: VelocityComparator<'a>,
    options: TrendOptions,
}

impl<'a> TrendAnalyzer<'a> {
    pub fn new(comparator: VelocityComparator<'a>, options: TrendOptions) -> TrendAnalyzer<'a> {
        TrendAnalyzer { comparator, options }
    }

    pub fn comparator(&self) -> &VelocityComparator<'a> {
        &self.comparator
    }

    pub fn options(&self) -> &TrendOptions {
        &self.options
    }

    /// Analyze an ordered series for one indicator.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` for fewer than 2 points; `NonFiniteValue`,
    ///   `OutOfOrder`, `ZeroAgeSpan` for malformed series.
    /// - `Reference` when the series' age span leaves the velocity table.
    pub fn analyze(
        &self, series: &[GrowthDataPoint], indicator: Indicator, sex: Sex,
    ) -> LongitudinalResult<TrendResult> {
        Ok(self.analyze_with_velocity(series, indicator, sex)?.0)
    }

    /// As [`analyze`](Self::analyze), also returning the velocity comparison
    /// the risk level was computed from.
    pub fn analyze_with_velocity(
        &self, series: &[GrowthDataPoint], indicator: Indicator, sex: Sex,
    ) -> LongitudinalResult<(TrendResult, VelocityResult)> {
        validate_series(series, 2)?;
        let ages: Vec<f64> = series.iter().map(GrowthDataPoint::age).collect();
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let fit = LinearFit::ols(&ages, &values)?;

        let epsilon = self.options.epsilon(indicator);
        let direction = if fit.slope > epsilon {
            Direction::Increasing
        } else if fit.slope < -epsilon {
            Direction::Decreasing
        } else {
            Direction::Stable
        };

        let p_value = if fit.n >= 3 { Some(fit.slope_test()?.p_value) } else { None };
        let significance = self.options.significance(p_value);

        let (start_age, end_age) = age_span(series);
        let velocity = self.comparator.compare_slope(fit.slope, indicator, sex, start_age, end_age)?;
        let worst = series.iter().map(|p| p.status).max().unwrap_or(GrowthStatus::Normal);
        let risk_level = risk_level(indicator, direction, significance, velocity.status, worst);

        let trend = TrendResult {
            indicator,
            direction,
            velocity: fit.slope,
            acceleration: acceleration(&ages, &values),
            consistency: fit.r_squared,
            significance,
            risk_level,
            recommendation: risk_level.recommendation().to_string(),
            p_value,
            points: series.len(),
        };
        Ok((trend, velocity))
    }
}

/// Slope of interval velocities against interval midpoints.
fn acceleration(ages: &[f64], values: &[f64]) -> f64 {
    let (midpoints, rates): (Vec<f64>, Vec<f64>) = ages
        .windows(2)
        .zip(values.windows(2))
        .filter(|(a, _)| a[1] > a[0])
        .map(|(a, v)| ((a[0] + a[1]) / 2.0, (v[1] - v[0]) / (a[1] - a[0])))
        .unzip();
    if midpoints.len() < 2 {
        return 0.0;
    }
    LinearFit::ols(&midpoints, &rates).map_or(0.0, |fit| fit.slope)
}

fn risk_level(
    indicator: Indicator, direction: Direction, significance: Significance, velocity_status: GrowthStatus,
    worst_status: GrowthStatus,
) -> RiskLevel {
    let adverse = if direction == Direction::Decreasing && indicator != Indicator::BmiForAge {
        1 + u8::from(significance >= Significance::Moderate)
    } else {
        0
    };
    RiskLevel::from_score(2 * worst_status.priority() + velocity_status.priority() + adverse)
}

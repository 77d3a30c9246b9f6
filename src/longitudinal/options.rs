//! longitudinal::options — validated configuration for series analysis.
//!
//! Purpose
//! -------
//! Hold the noise thresholds that separate a real trend from measurement
//! jitter, the p-value cut-offs that bucket slope significance, and the
//! faltering-rule parameters.
//!
//! Key behaviors
//! -------------
//! - [`TrendOptions::default`]: ε = 0.01 kg/mo (weight), 0.05 cm/mo
//!   (height), 0.02 cm/mo (head circumference), 0.02 kg/m²/mo (BMI);
//!   p-value cut-offs 0.1 / 0.05 / 0.01.
//! - [`FalteringOptions::default`]: 3 aligned points, a z decline of 0.67
//!   (one major centile band), a height-velocity percentile cut-off of 15.
//! - `new(..)` constructors validate once; analyzers rely on the invariants.
//!
//! Invariants & assumptions
//! ------------------------
//! - Noise thresholds are finite and ≥ 0.
//! - 0 < p_high < p_moderate < p_low < 1.
//! - `min_points ≥ 3`, `z_decline > 0`, `0 < velocity_percentile_cutoff < 100`.
use serde::{Deserialize, Serialize};

use crate::{
    longitudinal::{
        errors::{LongitudinalError, LongitudinalResult},
        trend::Significance,
    },
    reference::Indicator,
};

/// Trend classification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendOptions {
    /// |slope| at or below this is Stable for weight series (kg/month).
    pub weight_epsilon: f64,
    /// Same for height/length series (cm/month).
    pub height_epsilon: f64,
    /// Same for head-circumference series (cm/month).
    pub head_epsilon: f64,
    /// Same for BMI series (kg/m² per month).
    pub bmi_epsilon: f64,
    /// p below this is at least Low significance.
    pub p_low: f64,
    /// p below this is at least Moderate significance.
    pub p_moderate: f64,
    /// p below this is High significance.
    pub p_high: f64,
}

impl TrendOptions {
    /// Construct validated trend options.
    ///
    /// Errors
    /// ------
    /// - `LongitudinalError::InvalidOptions` naming the first offending
    ///   field.
    pub fn new(
        weight_epsilon: f64, height_epsilon: f64, head_epsilon: f64, bmi_epsilon: f64, p_low: f64,
        p_moderate: f64, p_high: f64,
    ) -> LongitudinalResult<TrendOptions> {
        for (field, value) in [
            ("weight_epsilon", weight_epsilon),
            ("height_epsilon", height_epsilon),
            ("head_epsilon", head_epsilon),
            ("bmi_epsilon", bmi_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LongitudinalError::InvalidOptions { field, value });
            }
        }
        if !(p_high > 0.0) {
            return Err(LongitudinalError::InvalidOptions { field: "p_high", value: p_high });
        }
        if !(p_moderate > p_high) {
            return Err(LongitudinalError::InvalidOptions { field: "p_moderate", value: p_moderate });
        }
        if !(p_low > p_moderate && p_low < 1.0) {
            return Err(LongitudinalError::InvalidOptions { field: "p_low", value: p_low });
        }
        Ok(TrendOptions { weight_epsilon, height_epsilon, head_epsilon, bmi_epsilon, p_low, p_moderate, p_high })
    }

    /// Noise threshold for a series of `indicator`.
    pub fn epsilon(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::WeightForAge | Indicator::WeightForHeight => self.weight_epsilon,
            Indicator::HeightForAge => self.height_epsilon,
            Indicator::HeadCircumferenceForAge => self.head_epsilon,
            Indicator::BmiForAge => self.bmi_epsilon,
        }
    }

    /// Bucket a slope p-value. `None` (no test possible) is `Significance::None`.
    pub fn significance(&self, p_value: Option<f64>) -> Significance {
        match p_value {
            Some(p) if p < self.p_high => Significance::High,
            Some(p) if p < self.p_moderate => Significance::Moderate,
            Some(p) if p < self.p_low => Significance::Low,
            _ => Significance::None,
        }
    }
}

impl Default for TrendOptions {
    fn default() -> Self {
        TrendOptions {
            weight_epsilon: 0.01,
            height_epsilon: 0.05,
            head_epsilon: 0.02,
            bmi_epsilon: 0.02,
            p_low: 0.1,
            p_moderate: 0.05,
            p_high: 0.01,
        }
    }
}

/// Faltering-rule parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalteringOptions {
    /// Minimum points per series, and aligned points, to evaluate rules.
    pub min_points: usize,
    /// z-score drop (first to last aligned point) that counts as a decline.
    pub z_decline: f64,
    /// Height-velocity percentile below which growth counts as stagnant.
    pub velocity_percentile_cutoff: f64,
}

impl FalteringOptions {
    /// Construct validated faltering options.
    ///
    /// Errors
    /// ------
    /// - `LongitudinalError::InvalidOptions` for `min_points < 3`,
    ///   non-positive `z_decline`, or a cut-off outside (0, 100).
    pub fn new(
        min_points: usize, z_decline: f64, velocity_percentile_cutoff: f64,
    ) -> LongitudinalResult<FalteringOptions> {
        if min_points < 3 {
            return Err(LongitudinalError::InvalidOptions { field: "min_points", value: min_points as f64 });
        }
        if !(z_decline.is_finite() && z_decline > 0.0) {
            return Err(LongitudinalError::InvalidOptions { field: "z_decline", value: z_decline });
        }
        if !(velocity_percentile_cutoff > 0.0 && velocity_percentile_cutoff < 100.0) {
            return Err(LongitudinalError::InvalidOptions {
                field: "velocity_percentile_cutoff",
                value: velocity_percentile_cutoff,
            });
        }
        Ok(FalteringOptions { min_points, z_decline, velocity_percentile_cutoff })
    }
}

impl Default for FalteringOptions {
    fn default() -> Self {
        FalteringOptions { min_points: 3, z_decline: 0.67, velocity_percentile_cutoff: 15.0 }
    }
}

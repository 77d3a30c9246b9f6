//! statistical_tests::normal — standard normal CDF and percentile helpers.
//!
//! Percentiles of the LMS method are Φ(z)·100. Φ is evaluated through the
//! complementary error function, Φ(z) = ½·erfc(−z/√2), which keeps full
//! relative precision in the lower tail where 1 − Φ would cancel.
use statrs::{
    distribution::{ContinuousCDF, Normal},
    function::erf::erfc,
};

use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// Standard normal cumulative distribution function Φ(z).
///
/// Returns 0 for −∞, 1 for +∞ and NaN for NaN.
#[inline]
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// Percentile (0–100) of a z-score under the standard normal.
///
/// The result is clamped to `[0, 100]` so rounding in `erfc` can never
/// push it outside the documented range.
#[inline]
pub fn percentile_from_z(z: f64) -> f64 {
    (standard_normal_cdf(z) * 100.0).clamp(0.0, 100.0)
}

/// z-score whose percentile is `percentile`, for centile-curve generation.
///
/// Errors
/// ------
/// - `StatTestError::InvalidProbability` unless `0 < percentile < 100`.
pub fn z_from_percentile(percentile: f64) -> StatTestResult<f64> {
    if !(percentile > 0.0 && percentile < 100.0) {
        return Err(StatTestError::InvalidProbability(percentile));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatTestError::Distribution(e.to_string()))?;
    Ok(normal.inverse_cdf(percentile / 100.0))
}

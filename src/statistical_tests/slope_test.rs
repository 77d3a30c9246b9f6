//! statistical_tests::slope_test — t-test for a simple-regression slope.
//!
//! Purpose
//! -------
//! Decide whether the OLS slope of a growth series differs from zero. The
//! test statistic is t = β̂ / se(β̂) with se(β̂) = √(SSE / (n − 2) / Sxx),
//! compared against Student's t with n − 2 degrees of freedom; the p-value
//! is two-sided.
//!
//! Key behaviors
//! -------------
//! - [`SlopeTest::from_fit`] takes the fit summary (slope, SSE, Sxx, n) so
//!   the regression itself stays with its caller.
//! - A residual-free fit (SSE = 0) has zero standard error: the p-value is
//!   0 for a non-zero slope and 1 for a zero slope, instead of dividing by
//!   zero.
//!
//! Invariants & assumptions
//! ------------------------
//! - n ≥ 3 (at least one residual degree of freedom).
//! - Sxx > 0; callers reject constant regressors through
//!   [`validate_input`](crate::statistical_tests::validation::validate_input).
//! - The returned p-value lies in [0, 1].
//!
//! Testing notes
//! -------------
//! - p-values are checked against the tabulated two-sided 5 % critical
//!   values of Student's t (2.228139 at 10 df, 12.7062 at 1 df).
use log::debug;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// Outcome of a two-sided t-test of H₀: slope = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeTest {
    pub slope: f64,
    pub std_error: f64,
    pub t_stat: f64,
    pub df: usize,
    pub p_value: f64,
}

impl SlopeTest {
    /// Run the slope t-test from a fitted simple regression.
    ///
    /// Parameters
    /// ----------
    /// - `slope`: estimated slope β̂.
    /// - `sse`: residual sum of squares of the fit.
    /// - `sxx`: Σ(xᵢ − x̄)², the regressor's centered sum of squares.
    /// - `n`: number of observations.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `InvalidData` when `slope` or `sse` is non-finite (index 0 / 1).
    /// - `ZeroVariance` when `sxx` is not strictly positive.
    /// - `Distribution` if `statrs` rejects the degrees of freedom.
    pub fn from_fit(slope: f64, sse: f64, sxx: f64, n: usize) -> StatTestResult<SlopeTest> {
        if n < 3 {
            return Err(StatTestError::InsufficientData { required: 3, actual: n });
        }
        if !slope.is_finite() {
            return Err(StatTestError::InvalidData { index: 0, value: slope });
        }
        if !sse.is_finite() {
            return Err(StatTestError::InvalidData { index: 1, value: sse });
        }
        if !(sxx.is_finite() && sxx > 0.0) {
            return Err(StatTestError::ZeroVariance);
        }

        let df = n - 2;
        let std_error = (sse.max(0.0) / df as f64 / sxx).sqrt();

        if std_error == 0.0 {
            let (t_stat, p_value) = if slope == 0.0 {
                (0.0, 1.0)
            } else {
                (slope.signum() * f64::INFINITY, 0.0)
            };
            return Ok(SlopeTest { slope, std_error, t_stat, df, p_value });
        }

        let t_stat = slope / std_error;
        let dist = StudentsT::new(0.0, 1.0, df as f64)
            .map_err(|e| StatTestError::Distribution(e.to_string()))?;
        let p_value = (2.0 * dist.sf(t_stat.abs())).clamp(0.0, 1.0);

        debug!("slope t-test: slope = {slope:.5}, se = {std_error:.5}, t = {t_stat:.4}, df = {df}, p = {p_value:.5}");
        Ok(SlopeTest { slope, std_error, t_stat, df, p_value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - p-values at tabulated critical values of Student's t.
    // - The zero-standard-error shortcut.
    // - Input guards (n < 3, Sxx ≤ 0).
    //
    // They intentionally DO NOT cover:
    // - Computing the fit summary from raw data; see
    //   `longitudinal::regression`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A t statistic at the two-sided 5 % critical value yields p ≈ 0.05.
    //
    // Given
    // -----
    // - n = 12 (df = 10), Sxx = 1, SSE = 10 so se = 1, slope = 2.228139.
    //
    // Expect
    // ------
    // - t = 2.228139, p ≈ 0.05.
    fn p_value_matches_t_table_at_ten_df() {
        // Arrange
        let slope = 2.228139;

        // Act
        let test = SlopeTest::from_fit(slope, 10.0, 1.0, 12).unwrap();

        // Assert
        assert_eq!(test.df, 10);
        assert_relative_eq!(test.std_error, 1.0, epsilon = 1e-12);
        assert_relative_eq!(test.t_stat, slope, epsilon = 1e-12);
        assert_relative_eq!(test.p_value, 0.05, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Same check at one degree of freedom, where the tails are heavy.
    //
    // Given
    // -----
    // - n = 3 (df = 1), Sxx = 1, SSE = 1, slope = −12.7062.
    //
    // Expect
    // ------
    // - p ≈ 0.05 regardless of the slope's sign.
    fn p_value_matches_t_table_at_one_df() {
        // Arrange / Act
        let test = SlopeTest::from_fit(-12.7062, 1.0, 1.0, 3).unwrap();

        // Assert
        assert_relative_eq!(test.p_value, 0.05, epsilon = 1e-4);
        assert!(test.t_stat < 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A perfect fit does not divide by zero.
    //
    // Given
    // -----
    // - SSE = 0 with a non-zero and a zero slope.
    //
    // Expect
    // ------
    // - p = 0 for the non-zero slope and p = 1 for the flat one.
    fn residual_free_fit_short_circuits() {
        // Arrange / Act
        let rising = SlopeTest::from_fit(0.3, 0.0, 5.0, 4).unwrap();
        let flat = SlopeTest::from_fit(0.0, 0.0, 5.0, 4).unwrap();

        // Assert
        assert_eq!(rising.p_value, 0.0);
        assert!(rising.t_stat.is_infinite() && rising.t_stat > 0.0);
        assert_eq!(flat.p_value, 1.0);
        assert_eq!(flat.t_stat, 0.0);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert_eq!(
            SlopeTest::from_fit(1.0, 1.0, 1.0, 2),
            Err(StatTestError::InsufficientData { required: 3, actual: 2 })
        );
        assert_eq!(SlopeTest::from_fit(1.0, 1.0, 0.0, 5), Err(StatTestError::ZeroVariance));
        assert!(matches!(
            SlopeTest::from_fit(f64::NAN, 1.0, 1.0, 5),
            Err(StatTestError::InvalidData { index: 0, .. })
        ));
    }

    #[test]
    fn small_t_gives_large_p_value() {
        let test = SlopeTest::from_fit(0.01, 4.0, 1.0, 6).unwrap();
        assert!(test.p_value > 0.9 && test.p_value <= 1.0);
    }
}

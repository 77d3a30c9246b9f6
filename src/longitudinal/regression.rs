//! longitudinal::regression — ordinary least squares of value on age.
//!
//! Purpose
//! -------
//! Fit y = a + b·x for a growth series and expose the quantities the trend
//! analysis reads: slope (velocity), R² (consistency), and the SSE/Sxx pair
//! the slope t-test needs.
//!
//! Key behaviors
//! -------------
//! - Sums are computed on centered data with `ndarray` to limit
//!   cancellation at large ages.
//! - R² is 1 by convention for two points or when y has no spread (both are
//!   residual-free fits); otherwise 1 − SSE/SST clamped to [0, 1].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs pass [`validate_input`]: equal length, n ≥ 2, finite, x not
//!   constant. Sxx is therefore strictly positive.
use log::debug;
use ndarray::ArrayView1;

use crate::statistical_tests::{SlopeTest, StatTestResult, validate_input};

/// Least-squares line through a paired sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Residual sum of squares.
    pub sse: f64,
    /// Centered sum of squares of x.
    pub sxx: f64,
}

impl LinearFit {
    /// Fit `y` on `x` by ordinary least squares.
    ///
    /// Errors
    /// ------
    /// - Any [`validate_input`] failure (length mismatch, n < 2, non-finite
    ///   value, constant `x`).
    pub fn ols(x: &[f64], y: &[f64]) -> StatTestResult<LinearFit> {
        validate_input(x, y, 2)?;
        let n = x.len();
        let x = ArrayView1::from(x);
        let y = ArrayView1::from(y);

        let x_mean = x.sum() / n as f64;
        let y_mean = y.sum() / n as f64;
        let dx = &x - x_mean;
        let dy = &y - y_mean;

        let sxx = dx.dot(&dx);
        let sxy = dx.dot(&dy);
        let syy = dy.dot(&dy);

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let residuals = &dy - &(&dx * slope);
        let sse = residuals.dot(&residuals);

        let flat_tol = 1e-24 * n as f64 * (1.0 + y_mean * y_mean);
        let r_squared = if n == 2 || syy <= flat_tol {
            1.0
        } else {
            (1.0 - sse / syy).clamp(0.0, 1.0)
        };

        debug!("OLS fit: n = {n}, slope = {slope:.5}, intercept = {intercept:.5}, R² = {r_squared:.4}");
        Ok(LinearFit { n, slope, intercept, r_squared, sse, sxx })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Two-sided t-test of the slope against zero (needs n ≥ 3).
    pub fn slope_test(&self) -> StatTestResult<SlopeTest> {
        SlopeTest::from_fit(self.slope, self.sse, self.sxx, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::StatTestError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Slope/intercept/R² on hand-computed samples.
    // - The R² conventions for two points and flat responses.
    // - Propagation of validation errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the fit against a hand-worked example.
    //
    // Given
    // -----
    // - x = [0, 1, 2, 3], y = [7.5, 7.3, 7.0, 6.8].
    //
    // Expect
    // ------
    // - slope = −0.24, intercept = 7.51, SSE = 0.002, Sxx = 5,
    //   R² = 1 − 0.002 / 0.29.
    fn ols_matches_hand_computation() {
        // Arrange
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [7.5, 7.3, 7.0, 6.8];

        // Act
        let fit = LinearFit::ols(&x, &y).unwrap();

        // Assert
        assert_relative_eq!(fit.slope, -0.24, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 7.51, epsilon = 1e-12);
        assert_relative_eq!(fit.sse, 0.002, epsilon = 1e-12);
        assert_relative_eq!(fit.sxx, 5.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0 - 0.002 / 0.29, epsilon = 1e-10);
        assert_relative_eq!(fit.predict(1.5), 7.15, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Two points and flat series are residual-free, so R² = 1.
    //
    // Given
    // -----
    // - Two points; three points with equal y.
    //
    // Expect
    // ------
    // - R² = 1 for both; the flat series has slope 0.
    fn residual_free_fits_have_unit_r_squared() {
        // Arrange / Act
        let two = LinearFit::ols(&[3.0, 4.0], &[6.0, 6.6]).unwrap();
        let flat = LinearFit::ols(&[3.0, 4.0, 5.0], &[6.0, 6.0, 6.0]).unwrap();

        // Assert
        assert_eq!(two.r_squared, 1.0);
        assert_relative_eq!(two.slope, 0.6, epsilon = 1e-12);
        assert_eq!(flat.r_squared, 1.0);
        assert_eq!(flat.slope, 0.0);
    }

    #[test]
    fn validation_errors_propagate() {
        assert_eq!(LinearFit::ols(&[2.0, 2.0], &[1.0, 2.0]), Err(StatTestError::ZeroVariance));
        assert!(LinearFit::ols(&[1.0], &[1.0]).is_err());
    }

    #[test]
    fn slope_test_requires_three_points() {
        let two = LinearFit::ols(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
        assert!(matches!(two.slope_test(), Err(StatTestError::InsufficientData { .. })));
        let four = LinearFit::ols(&[0.0, 1.0, 2.0, 3.0], &[7.5, 7.3, 7.0, 6.8]).unwrap();
        assert!(four.slope_test().unwrap().p_value < 0.01);
    }
}

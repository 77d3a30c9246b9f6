//! statistical_tests::validation — shared input guards for paired samples.
//!
//! Purpose
//! -------
//! Centralize the checks every regression-style routine needs before it
//! touches the data: equal lengths, a minimum number of observations,
//! finiteness, and spread in the regressor.
//!
//! Conventions
//! -----------
//! - Pure validation: no allocation beyond error construction, no I/O.
//! - Checks run in a fixed order (length, count, finiteness, spread) so the
//!   reported error is deterministic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each error branch and the success path.

use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// Validate a paired sample `(x, y)` for a regression of `y` on `x`.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   Regressor values (ages in months for growth series).
/// - `y`: `&[f64]`
///   Response values, paired element-wise with `x`.
/// - `min_len`: `usize`
///   Minimum number of pairs required by the caller.
///
/// Errors
/// ------
/// - `StatTestError::LengthMismatch` when `x.len() != y.len()`.
/// - `StatTestError::InsufficientData` when fewer than `min_len` pairs.
/// - `StatTestError::InvalidData` for the first non-finite element, `x`
///   checked before `y`.
/// - `StatTestError::ZeroVariance` when every `x` is equal.
///
/// Examples
/// --------
/// ```rust
/// # use growth_analytics::statistical_tests::validation::validate_input;
/// # use growth_analytics::statistical_tests::errors::StatTestError;
/// let ages = [0.0, 1.0, 2.0];
/// let weights = [3.3, 4.4, 5.5];
/// assert!(validate_input(&ages, &weights, 2).is_ok());
///
/// match validate_input(&[1.0, 1.0], &[3.0, 4.0], 2) {
///     Err(StatTestError::ZeroVariance) => (),
///     other => panic!("expected ZeroVariance, got {other:?}"),
/// }
/// ```
pub fn validate_input(x: &[f64], y: &[f64], min_len: usize) -> StatTestResult<()> {
    if x.len() != y.len() {
        return Err(StatTestError::LengthMismatch { x_len: x.len(), y_len: y.len() });
    }

    if x.len() < min_len {
        return Err(StatTestError::InsufficientData { required: min_len, actual: x.len() });
    }

    for series in [x, y] {
        if let Some((index, &value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StatTestError::InvalidData { index, value });
        }
    }

    match x.first() {
        Some(first) if x.iter().all(|v| v == first) => Err(StatTestError::ZeroVariance),
        _ => Ok(()),
    }
}

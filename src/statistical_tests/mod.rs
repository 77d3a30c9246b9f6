//! statistical_tests — numeric significance helpers.
//!
//! Purpose
//! -------
//! Collect the small statistical routines the assessment and longitudinal
//! layers rely on, isolated so they can be tested against reference values:
//! the standard normal CDF used for percentiles, and the Student-t test of a
//! regression slope used for trend significance.
//!
//! Key behaviors
//! -------------
//! - [`standard_normal_cdf`] / [`percentile_from_z`] map z-scores to
//!   percentiles via `statrs::function::erf::erfc`; [`z_from_percentile`]
//!   inverts the mapping for centile curves.
//! - [`SlopeTest::from_fit`] computes the two-sided p-value of H₀: β = 0.
//! - [`validate_input`] guards paired samples before any regression.
//!
//! Invariants & assumptions
//! ------------------------
//! - Routines never panic on user-facing invalid input; they report
//!   [`StatTestError`] via [`StatTestResult`].
//! - At the Python boundary every [`StatTestError`] maps to `ValueError`
//!   with the `Display` message preserved.
//!
//! Downstream usage
//! ----------------
//! - ```rust
//!   use growth_analytics::statistical_tests::{SlopeTest, percentile_from_z};
//!
//!   let p = percentile_from_z(-2.0);
//!   assert!((p - 2.275).abs() < 1e-3);
//!   let test = SlopeTest::from_fit(0.25, 0.02, 10.0, 5)?;
//!   assert!(test.p_value < 0.01);
//!   # Ok::<(), growth_analytics::statistical_tests::StatTestError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - [`errors`] checks `Display` payloads, [`validation`] each guard,
//!   [`normal`] tabulated Φ values and [`slope_test`] tabulated t critical
//!   values.

pub mod errors;
pub mod normal;
pub mod slope_test;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{StatTestError, StatTestResult};
pub use self::normal::{percentile_from_z, standard_normal_cdf, z_from_percentile};
pub use self::slope_test::SlopeTest;
pub use self::validation::validate_input;

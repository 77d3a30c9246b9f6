//! reference::lms — LMS parameters, interpolation, and the Box–Cox transform.
//!
//! Purpose
//! -------
//! Hold the (L, M, S) parameters of a reference distribution at one axis
//! value, interpolate them between tabulated points, and apply the LMS
//! transform in both directions (measurement → z-score, z-score →
//! measurement).
//!
//! Key behaviors
//! -------------
//! - [`LmsParams::z_score`] implements
//!   z = ((y / M)^L − 1) / (L · S) for L ≠ 0 and z = ln(y / M) / S for L = 0.
//! - [`LmsParams::z_score_restricted`] applies the WHO restricted-tail
//!   adjustment beyond ±3 SD, linear in y using the SD2–SD3 distance.
//! - [`LmsParams::value_at`] inverts the transform to produce centile curves.
//! - [`LmsTable::at`] linearly interpolates L, M and S on the axis before
//!   any transform is applied.
//!
//! Invariants & assumptions
//! ------------------------
//! - M > 0 and S > 0, all three parameters finite (checked by
//!   [`LmsParams::new`]).
//! - Table points are strictly increasing in `x`; construction goes through
//!   [`ReferenceStandards`](crate::reference::ReferenceStandards), which
//!   sorts and rejects duplicates.
//! - Values passed to the transforms are finite and strictly positive; the
//!   assessment layer rejects anything else before calling in.
//!
//! Conventions
//! -----------
//! - |L| below [`L_ZERO_TOL`] is treated as L = 0 to avoid the cancellation
//!   in ((y / M)^L − 1) / L when L is tiny after interpolation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover z = 0 at the median, the L = 0 branch, inversion,
//!   continuity of the restricted-tail adjustment at ±3, and interpolation.
use serde::Serialize;

/// |L| below this is treated as the log-normal (L = 0) case.
pub const L_ZERO_TOL: f64 = 1e-12;

/// Box–Cox power (L), median (M) and coefficient of variation (S).
///
/// Only built through [`LmsParams::new`] or table interpolation, so M and S
/// are always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LmsParams {
    pub(crate) l: f64,
    pub(crate) m: f64,
    pub(crate) s: f64,
}

impl LmsParams {
    /// Validate and construct a parameter triple.
    ///
    /// Returns `Err(reason)` when a parameter is non-finite, or M/S are not
    /// strictly positive. The caller attaches table context to the reason.
    pub fn new(l: f64, m: f64, s: f64) -> Result<Self, &'static str> {
        if !l.is_finite() {
            return Err("L must be finite");
        }
        if !m.is_finite() || m <= 0.0 {
            return Err("M must be finite and > 0");
        }
        if !s.is_finite() || s <= 0.0 {
            return Err("S must be finite and > 0");
        }
        Ok(LmsParams { l, m, s })
    }

    /// Box–Cox power.
    #[inline]
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Median.
    #[inline]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Coefficient of variation.
    #[inline]
    pub fn s(&self) -> f64 {
        self.s
    }

    /// Component-wise linear interpolation, `t ∈ [0, 1]`.
    #[inline]
    pub(crate) fn lerp(&self, other: &LmsParams, t: f64) -> LmsParams {
        LmsParams {
            l: self.l + (other.l - self.l) * t,
            m: self.m + (other.m - self.m) * t,
            s: self.s + (other.s - self.s) * t,
        }
    }

    /// Plain LMS z-score of `value`.
    #[inline]
    pub fn z_score(&self, value: f64) -> f64 {
        let ratio = value / self.m;
        if self.l.abs() < L_ZERO_TOL {
            ratio.ln() / self.s
        } else {
            (ratio.powf(self.l) - 1.0) / (self.l * self.s)
        }
    }

    /// LMS z-score with the WHO restricted-tail adjustment.
    ///
    /// Inside [−3, 3] this equals [`z_score`](Self::z_score). Outside, the
    /// distance past the ±3 SD curve is measured in units of the SD2–SD3
    /// spacing, which keeps extreme z-scores from being inflated by the
    /// skewness model. The result is continuous at ±3 and strictly increasing
    /// in `value`.
    pub fn z_score_restricted(&self, value: f64) -> f64 {
        let z = self.z_score(value);
        if z > 3.0 {
            if let (Some(sd2), Some(sd3)) = (self.value_at(2.0), self.value_at(3.0)) {
                return 3.0 + (value - sd3) / (sd3 - sd2);
            }
        } else if z < -3.0 {
            if let (Some(sd2), Some(sd3)) = (self.value_at(-2.0), self.value_at(-3.0)) {
                return -3.0 + (value - sd3) / (sd2 - sd3);
            }
        }
        z
    }

    /// Measurement value at z-score `z` (inverse LMS transform).
    ///
    /// Returns `None` when 1 + L·S·z ≤ 0, where the Box–Cox inverse is
    /// undefined.
    pub fn value_at(&self, z: f64) -> Option<f64> {
        if self.l.abs() < L_ZERO_TOL {
            return Some(self.m * (self.s * z).exp());
        }
        let base = 1.0 + self.l * self.s * z;
        if base <= 0.0 {
            return None;
        }
        Some(self.m * base.powf(1.0 / self.l))
    }
}

/// One tabulated row: axis value plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmsPoint {
    pub x: f64,
    pub params: LmsParams,
}

/// Sorted LMS rows for a single (indicator, sex) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LmsTable {
    points: Vec<LmsPoint>,
}

impl LmsTable {
    /// Wrap rows already sorted strictly increasing in `x` and non-empty.
    pub(crate) fn from_sorted(points: Vec<LmsPoint>) -> LmsTable {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        LmsTable { points }
    }

    /// Smallest and largest tabulated axis values.
    pub fn domain(&self) -> (f64, f64) {
        let first = self.points.first().map_or(f64::NAN, |p| p.x);
        let last = self.points.last().map_or(f64::NAN, |p| p.x);
        (first, last)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LmsPoint] {
        &self.points
    }

    /// Parameters at `x`, interpolated between neighbouring rows.
    ///
    /// Returns `None` when `x` is non-finite or outside [`domain`](Self::domain).
    pub fn at(&self, x: f64) -> Option<LmsParams> {
        let (min, max) = self.domain();
        if !x.is_finite() || x < min || x > max {
            return None;
        }

        // First row with point.x >= x; exists because x <= max.
        let idx = self.points.partition_point(|p| p.x < x);
        let upper = self.points[idx];
        if upper.x == x || idx == 0 {
            return Some(upper.params);
        }
        let lower = self.points[idx - 1];
        let t = (x - lower.x) / (upper.x - lower.x);
        Some(lower.params.lerp(&upper.params, t))
    }
}

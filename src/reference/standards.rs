//! reference::standards — the immutable reference-data set.
//!
//! Purpose
//! -------
//! Build, validate and query the process-wide reference data: LMS tables
//! keyed by (indicator, sex) and expected-velocity tables keyed the same way.
//! The set is created once at startup and shared read-only by every caller.
//!
//! Key behaviors
//! -------------
//! - [`ReferenceStandards::from_entries`] groups flat table rows, sorts them,
//!   rejects malformed rows and duplicated axis values, and validates velocity
//!   bands (non-empty, contiguous, finite mean, sd > 0).
//! - [`ReferenceStandards::who`] builds the bundled WHO Child Growth
//!   Standards subset and additionally requires every indicator/sex table to
//!   be present.
//! - [`ReferenceStandards::lms`] returns interpolated LMS parameters or a
//!   typed out-of-range / missing-table error; it never extrapolates.
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction the value is never mutated. It is `Send + Sync` and
//!   is passed by reference (or inside an `Arc`) rather than through a
//!   global, so tests can substitute small fixture tables.
//! - Completeness is only enforced by [`ReferenceStandards::who`] and
//!   [`ReferenceStandards::require_complete`]; fixtures may hold a single
//!   table.
//!
//! Downstream usage
//! ----------------
//! - Build once at startup:
//!
//!   ```rust
//!   use growth_analytics::reference::{Indicator, ReferenceStandards, Sex};
//!
//!   let standards = ReferenceStandards::who()?;
//!   let params = standards.lms(Indicator::WeightForAge, Sex::Female, 6.0)?;
//!   assert!(params.m() > 0.0);
//!   # Ok::<(), growth_analytics::reference::ReferenceError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover each construction error, the completeness check on the
//!   bundled tables, and lookup failures.
use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::reference::{
    errors::{ReferenceError, ReferenceResult},
    indicator::{Indicator, Sex},
    lms::{LmsParams, LmsPoint, LmsTable},
    velocity::{ExpectedVelocity, VelocityBand, VelocityTable},
    who_data,
};

/// One row of an LMS reference table.
///
/// `x` is the age in completed months, or the height in cm for
/// [`Indicator::WeightForHeight`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTableEntry {
    pub indicator: Indicator,
    pub sex: Sex,
    pub x: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

/// One band of an expected-velocity table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityTableEntry {
    pub indicator: Indicator,
    pub sex: Sex,
    pub start_month: u32,
    pub end_month: u32,
    pub mean: f64,
    pub sd: f64,
}

/// Immutable LMS and velocity reference tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceStandards {
    lms: HashMap<(Indicator, Sex), LmsTable>,
    velocity: HashMap<(Indicator, Sex), VelocityTable>,
}

impl ReferenceStandards {
    /// Build standards from flat table rows.
    ///
    /// Parameters
    /// ----------
    /// - `lms_entries`: rows of any LMS tables, in any order.
    /// - `velocity_entries`: velocity bands of any tables, in any order.
    ///
    /// Returns
    /// -------
    /// `ReferenceResult<ReferenceStandards>`
    ///   - `Ok` when every row is well-formed.
    ///   - `Err(ReferenceError)` describing the first malformed row.
    ///
    /// Errors
    /// ------
    /// - `NonFiniteAxis`, `InvalidParams`, `DuplicateAxisValue` for LMS rows.
    /// - `InvalidVelocityBand` for empty, overlapping or gapped bands, or a
    ///   band with non-finite mean or sd ≤ 0.
    pub fn from_entries<L, V>(lms_entries: L, velocity_entries: V) -> ReferenceResult<Self>
    where
        L: IntoIterator<Item = ReferenceTableEntry>,
        V: IntoIterator<Item = VelocityTableEntry>,
    {
        let mut grouped: HashMap<(Indicator, Sex), Vec<LmsPoint>> = HashMap::new();
        for entry in lms_entries {
            let ReferenceTableEntry { indicator, sex, x, l, m, s } = entry;
            if !x.is_finite() {
                return Err(ReferenceError::NonFiniteAxis { indicator, sex, x });
            }
            let params = LmsParams::new(l, m, s)
                .map_err(|reason| ReferenceError::InvalidParams { indicator, sex, x, reason })?;
            grouped.entry((indicator, sex)).or_default().push(LmsPoint { x, params });
        }

        let mut lms = HashMap::with_capacity(grouped.len());
        for ((indicator, sex), mut points) in grouped {
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            if let Some(dup) = points.windows(2).find(|w| w[0].x == w[1].x) {
                return Err(ReferenceError::DuplicateAxisValue { indicator, sex, x: dup[0].x });
            }
            lms.insert((indicator, sex), LmsTable::from_sorted(points));
        }

        let mut grouped_bands: HashMap<(Indicator, Sex), Vec<VelocityBand>> = HashMap::new();
        for entry in velocity_entries {
            let VelocityTableEntry { indicator, sex, start_month, end_month, mean, sd } = entry;
            let invalid = |reason| ReferenceError::InvalidVelocityBand {
                indicator,
                sex,
                start_month,
                end_month,
                reason,
            };
            if start_month >= end_month {
                return Err(invalid("band must satisfy start_month < end_month"));
            }
            if !mean.is_finite() {
                return Err(invalid("mean velocity must be finite"));
            }
            if !sd.is_finite() || sd <= 0.0 {
                return Err(invalid("velocity sd must be finite and > 0"));
            }
            grouped_bands.entry((indicator, sex)).or_default().push(VelocityBand {
                start_month,
                end_month,
                mean,
                sd,
            });
        }

        let mut velocity = HashMap::with_capacity(grouped_bands.len());
        for ((indicator, sex), mut bands) in grouped_bands {
            bands.sort_by_key(|b| b.start_month);
            if let Some(w) = bands.windows(2).find(|w| w[0].end_month != w[1].start_month) {
                return Err(ReferenceError::InvalidVelocityBand {
                    indicator,
                    sex,
                    start_month: w[1].start_month,
                    end_month: w[1].end_month,
                    reason: "velocity bands must be contiguous and non-overlapping",
                });
            }
            velocity.insert((indicator, sex), VelocityTable::from_sorted(bands));
        }

        debug!("built reference standards: {} LMS tables, {} velocity tables", lms.len(), velocity.len());
        Ok(ReferenceStandards { lms, velocity })
    }

    /// Bundled WHO Child Growth Standards subset (0–60 months).
    ///
    /// Ages are tabulated monthly up to 12 months and every three months
    /// thereafter; intermediate months are interpolated. Weight-for-height is
    /// tabulated every 5 cm from 45 to 120 cm.
    ///
    /// WHO publishes weight-for-length (recumbent, under 24 months) and
    /// weight-for-height (standing, 24 months on) as separate tables, with
    /// length about 0.7 cm greater than height for the same child. This
    /// subset carries a single table on the 45–120 cm axis and uses it at
    /// every age, so scores near the 24-month switch can differ slightly from
    /// the published weight-for-length values.
    ///
    /// Errors
    /// ------
    /// - Any construction error from [`from_entries`](Self::from_entries).
    /// - `MissingTable` / `MissingVelocityTable` if a required table is absent.
    pub fn who() -> ReferenceResult<Self> {
        let standards = Self::from_entries(who_data::lms_entries(), who_data::velocity_entries())?;
        standards.require_complete()?;
        Ok(standards)
    }

    /// Require an LMS table for every indicator/sex pair and a velocity table
    /// for every indicator that has one.
    pub fn require_complete(&self) -> ReferenceResult<()> {
        for sex in Sex::ALL {
            for indicator in Indicator::ALL {
                if !self.lms.contains_key(&(indicator, sex)) {
                    return Err(ReferenceError::MissingTable { indicator, sex });
                }
            }
            for indicator in Indicator::WITH_VELOCITY {
                if !self.velocity.contains_key(&(indicator, sex)) {
                    return Err(ReferenceError::MissingVelocityTable { indicator, sex });
                }
            }
        }
        Ok(())
    }

    pub fn table(&self, indicator: Indicator, sex: Sex) -> ReferenceResult<&LmsTable> {
        self.lms.get(&(indicator, sex)).ok_or(ReferenceError::MissingTable { indicator, sex })
    }

    /// Tabulated axis range for an (indicator, sex) pair.
    pub fn domain(&self, indicator: Indicator, sex: Sex) -> ReferenceResult<(f64, f64)> {
        Ok(self.table(indicator, sex)?.domain())
    }

    /// LMS parameters at axis value `x`, interpolated between rows.
    ///
    /// Errors
    /// ------
    /// - `MissingTable` when no table exists for (indicator, sex).
    /// - `OutOfRange` when `x` lies outside the tabulated range.
    pub fn lms(&self, indicator: Indicator, sex: Sex, x: f64) -> ReferenceResult<LmsParams> {
        let table = self.table(indicator, sex)?;
        table.at(x).ok_or_else(|| {
            let (min, max) = table.domain();
            ReferenceError::OutOfRange { indicator, sex, x, min, max }
        })
    }

    /// Expected velocity band for a series of `indicator` at `age_months`.
    ///
    /// The velocity table is resolved through
    /// [`Indicator::velocity_source`], so weight-for-height series use the
    /// weight table.
    pub fn expected_velocity(
        &self, indicator: Indicator, sex: Sex, age_months: f64,
    ) -> ReferenceResult<VelocityBand> {
        let source = indicator.velocity_source();
        let table = self
            .velocity
            .get(&(source, sex))
            .ok_or(ReferenceError::MissingVelocityTable { indicator: source, sex })?;
        table.band_at(age_months).ok_or_else(|| {
            let (min, max) = table.domain();
            ReferenceError::OutOfRange {
                indicator: source,
                sex,
                x: age_months,
                min: min as f64,
                max: max as f64,
            }
        })
    }

    /// Expected velocity for a series of `indicator` observed from
    /// `start_age` to `end_age` months, weighting each velocity band by the
    /// share of the span it covers.
    ///
    /// Errors
    /// ------
    /// - `MissingVelocityTable` when no table exists for the pair.
    /// - `OutOfRange` when the span is reversed or leaves the table; `x`
    ///   reports the offending end.
    pub fn expected_velocity_over(
        &self, indicator: Indicator, sex: Sex, start_age: f64, end_age: f64,
    ) -> ReferenceResult<ExpectedVelocity> {
        let source = indicator.velocity_source();
        let table = self
            .velocity
            .get(&(source, sex))
            .ok_or(ReferenceError::MissingVelocityTable { indicator: source, sex })?;
        table.expected_over(start_age, end_age).ok_or_else(|| {
            let (min, max) = table.domain();
            let x = if start_age < min as f64 || !start_age.is_finite() { start_age } else { end_age };
            ReferenceError::OutOfRange { indicator: source, sex, x, min: min as f64, max: max as f64 }
        })
    }
}

//! Expected growth-velocity bands.
//!
//! A velocity table splits the supported age range into contiguous bands
//! `[start_month, end_month)` and stores the mean and standard deviation of
//! the monthly increment within each band. The last band also covers its
//! `end_month`, so a 60-month lookup resolves against a `[24, 60)` band.
//!
//! A series observed over `[start, end]` is compared against
//! [`VelocityTable::expected_over`]: the band means and sds averaged with
//! weights proportional to the part of the span each band covers. A series
//! from 0 to 12 months is thus held to a blend of the fast early bands and
//! the slower 6–12 month band rather than to one band alone.
use serde::{Deserialize, Serialize};

/// Mean/sd of the monthly increment for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityBand {
    pub start_month: u32,
    pub end_month: u32,
    /// Expected increment per month, in the indicator's unit.
    pub mean: f64,
    /// Standard deviation of the monthly increment.
    pub sd: f64,
}

impl VelocityBand {
    #[inline]
    fn contains(&self, age_months: f64) -> bool {
        age_months >= self.start_month as f64 && age_months < self.end_month as f64
    }
}

/// Expected velocity over an age span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedVelocity {
    pub start_age: f64,
    pub end_age: f64,
    /// Span-weighted mean monthly increment.
    pub mean: f64,
    /// Span-weighted standard deviation of the monthly increment.
    pub sd: f64,
}

/// Contiguous, sorted velocity bands for one (indicator, sex) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityTable {
    bands: Vec<VelocityBand>,
}

impl VelocityTable {
    /// Wrap bands already validated as sorted, non-empty and contiguous.
    pub(crate) fn from_sorted(bands: Vec<VelocityBand>) -> VelocityTable {
        debug_assert!(!bands.is_empty());
        debug_assert!(bands.windows(2).all(|w| w[0].end_month == w[1].start_month));
        VelocityTable { bands }
    }

    pub fn bands(&self) -> &[VelocityBand] {
        &self.bands
    }

    /// Covered age range in months, both ends inclusive.
    pub fn domain(&self) -> (u32, u32) {
        let start = self.bands.first().map_or(0, |b| b.start_month);
        let end = self.bands.last().map_or(0, |b| b.end_month);
        (start, end)
    }

    /// Band covering `age_months`, if any.
    pub fn band_at(&self, age_months: f64) -> Option<VelocityBand> {
        if !age_months.is_finite() {
            return None;
        }
        if let Some(band) = self.bands.iter().find(|b| b.contains(age_months)) {
            return Some(*band);
        }
        self.bands.last().filter(|b| age_months == b.end_month as f64).copied()
    }

    /// Expected velocity over `[start_age, end_age]`, weighting each band by
    /// its overlap with the span.
    ///
    /// A zero-length span falls back to the band at `start_age`. Returns
    /// `None` when the span is reversed, non-finite or leaves the table.
    pub fn expected_over(&self, start_age: f64, end_age: f64) -> Option<ExpectedVelocity> {
        if !(start_age.is_finite() && end_age.is_finite()) || end_age < start_age {
            return None;
        }
        let (lo, hi) = self.domain();
        if start_age < lo as f64 || end_age > hi as f64 {
            return None;
        }
        if end_age == start_age {
            return self
                .band_at(start_age)
                .map(|b| ExpectedVelocity { start_age, end_age, mean: b.mean, sd: b.sd });
        }

        let span = end_age - start_age;
        let (mean, sd) = self.bands.iter().fold((0.0, 0.0), |(mean, sd), band| {
            let overlap = end_age.min(band.end_month as f64) - start_age.max(band.start_month as f64);
            if overlap > 0.0 {
                let w = overlap / span;
                (mean + w * band.mean, sd + w * band.sd)
            } else {
                (mean, sd)
            }
        });
        Some(ExpectedVelocity { start_age, end_age, mean, sd })
    }
}

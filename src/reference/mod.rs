//! reference — growth reference distributions.
//!
//! Purpose
//! -------
//! Own the read-only reference data every assessment is computed against:
//! LMS parameter tables per (indicator, sex) and expected monthly-velocity
//! bands. The bundled data is a subset of the WHO Child Growth Standards for
//! 0–60 months; other sets can be loaded from JSON.
//!
//! Key behaviors
//! -------------
//! - [`ReferenceStandards`] validates tables once at construction and is then
//!   shared immutably.
//! - [`LmsParams`] implements the Box–Cox (LMS) transform and its inverse.
//! - Lookups never extrapolate; out-of-range values surface as
//!   [`ReferenceError::OutOfRange`].
//!
//! Downstream usage
//! ----------------
//! - `assessment` resolves z-scores and centile values through
//!   [`ReferenceStandards::lms`].
//! - `longitudinal` resolves the expected velocity of a series through
//!   [`ReferenceStandards::expected_velocity_over`], which blends every band
//!   the series' age span touches.
pub mod errors;
pub mod indicator;
pub mod lms;
pub mod loader;
pub mod standards;
pub mod velocity;
mod who_data;

pub use self::errors::{ReferenceError, ReferenceResult};
pub use self::indicator::{Indicator, LookupAxis, Sex};
pub use self::lms::{LmsParams, LmsPoint, LmsTable};
pub use self::loader::ReferenceDocument;
pub use self::standards::{ReferenceStandards, ReferenceTableEntry, VelocityTableEntry};
pub use self::velocity::{ExpectedVelocity, VelocityBand, VelocityTable};

//! longitudinal — analysis of a child's growth series over time.
//!
//! Purpose
//! -------
//! Turn an ordered series of recorded [`GrowthDataPoint`]s into trend,
//! velocity and faltering signals that catch slowing growth before a single
//! measurement crosses an alert threshold.
//!
//! Key behaviors
//! -------------
//! - [`LinearFit`] fits value against age by ordinary least squares; its
//!   slope is the series velocity in units per month.
//! - [`VelocityComparator`] scores the observed velocity against the
//!   reference velocity over the series' age span, blending
//!   every band the span touches.
//! - [`TrendAnalyzer`] derives direction, acceleration, consistency (R²),
//!   slope significance and a risk level.
//! - [`FalteringDetector`] aligns a weight and a height series and applies
//!   the cross-indicator faltering rules.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series are ordered by date and by age; malformed series are errors,
//!   never silently reordered.
//! - Trend and velocity need ≥ 2 points. A 2-point series reports
//!   significance None and consistency 1.
//! - Faltering needs ≥ 3 points per series; shorter input yields an
//!   explicit insufficient-data result.
//!
//! Conventions
//! -----------
//! - Ages are completed months (`u32`) and are used directly as the
//!   regressor; velocities are per month.
//! - Longitudinal calls take the child's sex because velocity references
//!   are sex-specific.
pub mod errors;
pub mod faltering;
pub mod options;
pub mod regression;
pub mod series;
pub mod trend;
pub mod velocity;

pub use self::errors::{LongitudinalError, LongitudinalResult};
pub use self::faltering::{
    AlignedSeries, FalteringDetector, FalteringResult, FalteringRule, Severity, align,
};
pub use self::options::{FalteringOptions, TrendOptions};
pub use self::regression::LinearFit;
pub use self::series::{GrowthDataPoint, validate_series};
pub use self::trend::{Direction, RiskLevel, Significance, TrendAnalyzer, TrendResult};
pub use self::velocity::{VelocityComparator, VelocityResult};

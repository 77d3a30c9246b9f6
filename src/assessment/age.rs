//! Age in completed calendar months.
//!
//! The count is `(y2 − y1)·12 + (m2 − m1)`, minus one when the observation
//! day-of-month is earlier than the birth day-of-month. A birth day that
//! does not exist in the observation month (Jan 31 → Feb 28) counts the
//! month as completed once the last day of that month is reached.
use chrono::{Datelike, NaiveDate};

use crate::assessment::errors::{AssessmentError, AssessmentResult};

/// Whole months elapsed between `birth` and `observation`.
///
/// Errors
/// ------
/// - `AssessmentError::InvalidDateRange` when `observation < birth`.
///
/// Examples
/// --------
/// ```rust
/// # use chrono::NaiveDate;
/// # use growth_analytics::assessment::age_in_months;
/// let birth = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let visit = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
/// assert_eq!(age_in_months(birth, visit).unwrap(), 6);
/// ```
pub fn age_in_months(birth: NaiveDate, observation: NaiveDate) -> AssessmentResult<u32> {
    if observation < birth {
        return Err(AssessmentError::InvalidDateRange { birth, observation });
    }

    let years = observation.year() - birth.year();
    let months = years * 12 + observation.month() as i32 - birth.month() as i32;
    let completed = if observation.day() < birth.day() && !is_last_day_of_month(observation) {
        months - 1
    } else {
        months
    };
    // observation >= birth guarantees completed >= 0.
    Ok(completed.max(0) as u32)
}

/// Whole days elapsed between `birth` and `observation`.
///
/// Errors
/// ------
/// - `AssessmentError::InvalidDateRange` when `observation < birth`.
pub fn age_in_days(birth: NaiveDate, observation: NaiveDate) -> AssessmentResult<u32> {
    if observation < birth {
        return Err(AssessmentError::InvalidDateRange { birth, observation });
    }
    let days = observation.signed_duration_since(birth).num_days();
    Ok(u32::try_from(days).unwrap_or(u32::MAX))
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}

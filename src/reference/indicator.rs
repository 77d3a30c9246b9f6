//! Keys of the reference tables: child sex and anthropometric indicator.
//!
//! Every indicator except weight-for-height is tabulated against age in
//! completed months. Weight-for-height is tabulated against height in cm,
//! which [`Indicator::axis`] exposes so lookups can report the right kind of
//! range failure.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reference::errors::ReferenceError;

/// Sex of the child; the WHO standards are sex-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "boy" => Ok(Sex::Male),
            "female" | "f" | "girl" => Ok(Sex::Female),
            _ => Err(ReferenceError::UnknownSex(s.to_string())),
        }
    }
}

/// Axis a reference table is tabulated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupAxis {
    /// Completed months since birth.
    AgeMonths,
    /// Recumbent length / standing height in cm.
    HeightCm,
}

/// Anthropometric indicator assessed against a reference distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    WeightForAge,
    HeightForAge,
    WeightForHeight,
    HeadCircumferenceForAge,
    BmiForAge,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::WeightForAge,
        Indicator::HeightForAge,
        Indicator::WeightForHeight,
        Indicator::HeadCircumferenceForAge,
        Indicator::BmiForAge,
    ];

    /// Indicators with a dedicated expected-velocity table.
    pub const WITH_VELOCITY: [Indicator; 4] = [
        Indicator::WeightForAge,
        Indicator::HeightForAge,
        Indicator::HeadCircumferenceForAge,
        Indicator::BmiForAge,
    ];

    pub fn axis(&self) -> LookupAxis {
        match self {
            Indicator::WeightForHeight => LookupAxis::HeightCm,
            _ => LookupAxis::AgeMonths,
        }
    }

    /// Indicator whose velocity table applies to a series of this indicator.
    ///
    /// A weight-for-height series carries weights, so it shares the weight
    /// velocity table.
    pub fn velocity_source(&self) -> Indicator {
        match self {
            Indicator::WeightForHeight => Indicator::WeightForAge,
            other => *other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::WeightForAge => "weight_for_age",
            Indicator::HeightForAge => "height_for_age",
            Indicator::WeightForHeight => "weight_for_height",
            Indicator::HeadCircumferenceForAge => "head_circumference_for_age",
            Indicator::BmiForAge => "bmi_for_age",
        }
    }

    /// Human-readable label used in result messages.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::WeightForAge => "Weight-for-age",
            Indicator::HeightForAge => "Height-for-age",
            Indicator::WeightForHeight => "Weight-for-height",
            Indicator::HeadCircumferenceForAge => "Head circumference-for-age",
            Indicator::BmiForAge => "BMI-for-age",
        }
    }

    /// Unit of the measured value.
    pub fn unit(&self) -> &'static str {
        match self {
            Indicator::WeightForAge | Indicator::WeightForHeight => "kg",
            Indicator::HeightForAge | Indicator::HeadCircumferenceForAge => "cm",
            Indicator::BmiForAge => "kg/m²",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weight_for_age" | "wfa" => Ok(Indicator::WeightForAge),
            "height_for_age" | "length_for_age" | "hfa" => Ok(Indicator::HeightForAge),
            "weight_for_height" | "weight_for_length" | "wfh" => Ok(Indicator::WeightForHeight),
            "head_circumference_for_age" | "hcfa" => Ok(Indicator::HeadCircumferenceForAge),
            "bmi_for_age" | "bmi" => Ok(Indicator::BmiForAge),
            _ => Err(ReferenceError::UnknownIndicator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that the string forms used by callers parse back to the same
    // indicator, including common abbreviations.
    //
    // Given
    // -----
    // - Canonical names from `as_str` plus "WFH" and "length-for-age".
    //
    // Expect
    // ------
    // - Each string parses to the expected variant.
    fn indicator_parses_canonical_names_and_aliases() {
        // Arrange / Act / Assert
        for indicator in Indicator::ALL {
            assert_eq!(indicator.as_str().parse::<Indicator>().unwrap(), indicator);
        }
        assert_eq!("WFH".parse::<Indicator>().unwrap(), Indicator::WeightForHeight);
        assert_eq!("length-for-age".parse::<Indicator>().unwrap(), Indicator::HeightForAge);
    }

    #[test]
    // Purpose
    // -------
    // Ensure unknown sex strings are rejected rather than defaulted.
    //
    // Given
    // -----
    // - The string "unknown".
    //
    // Expect
    // ------
    // - `ReferenceError::UnknownSex` carrying the raw input.
    fn sex_rejects_unknown_strings() {
        // Arrange / Act
        let result = "unknown".parse::<Sex>();

        // Assert
        assert_eq!(result, Err(ReferenceError::UnknownSex("unknown".to_string())));
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
    }

    #[test]
    fn only_weight_for_height_uses_height_axis() {
        for indicator in Indicator::ALL {
            let expected = if indicator == Indicator::WeightForHeight {
                LookupAxis::HeightCm
            } else {
                LookupAxis::AgeMonths
            };
            assert_eq!(indicator.axis(), expected);
        }
        assert_eq!(Indicator::WeightForHeight.velocity_source(), Indicator::WeightForAge);
    }
}

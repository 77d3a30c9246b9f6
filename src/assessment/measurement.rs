//! A single anthropometric observation.
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{
        options::MeasurementBounds,
        validation::{ValidationReport, validate_measurement},
    },
    reference::Sex,
};

/// Raw measurement taken at one visit.
///
/// `age_in_months` is the completed-month age from
/// [`age_in_months`](crate::assessment::age_in_months); being unsigned it is
/// never negative. Head circumference is optional because it is not taken at
/// every visit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub head_circumference_cm: Option<f64>,
    pub age_in_months: u32,
    pub sex: Sex,
}

impl Measurement {
    pub fn new(
        weight_kg: f64, height_cm: f64, head_circumference_cm: Option<f64>, age_in_months: u32, sex: Sex,
    ) -> Measurement {
        Measurement { weight_kg, height_cm, head_circumference_cm, age_in_months, sex }
    }

    pub fn validate(&self, bounds: &MeasurementBounds) -> ValidationReport {
        validate_measurement(
            self.weight_kg,
            self.height_cm,
            self.head_circumference_cm,
            self.age_in_months,
            bounds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_head_circumference() {
        let raw = r#"{"weight_kg": 7.9, "height_cm": 67.6, "age_in_months": 6, "sex": "male"}"#;
        let m: Measurement = serde_json::from_str(raw).unwrap();
        assert_eq!(m, Measurement::new(7.9, 67.6, None, 6, Sex::Male));
        assert!(m.validate(&MeasurementBounds::default()).is_valid);
    }
}

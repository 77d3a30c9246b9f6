//! Clinical status bands shared by point-in-time and velocity assessment.
use serde::{Deserialize, Serialize};

/// Severity band of a z-score: Normal, Warning or Alert.
///
/// Ordered by severity, so `max` over a set of statuses yields the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStatus {
    Normal,
    Warning,
    Alert,
}

impl GrowthStatus {
    /// 0 for Normal, 1 for Warning, 2 for Alert.
    pub fn priority(&self) -> u8 {
        match self {
            GrowthStatus::Normal => 0,
            GrowthStatus::Warning => 1,
            GrowthStatus::Alert => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStatus::Normal => "normal",
            GrowthStatus::Warning => "warning",
            GrowthStatus::Alert => "alert",
        }
    }
}

impl std::fmt::Display for GrowthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_priority() {
        assert!(GrowthStatus::Normal < GrowthStatus::Warning);
        assert!(GrowthStatus::Warning < GrowthStatus::Alert);
        let worst = [GrowthStatus::Warning, GrowthStatus::Alert, GrowthStatus::Normal]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(worst.priority(), 2);
    }
}

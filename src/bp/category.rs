//! Clinical-style categorization of blood pressure pairs.
//!
//! Buckets follow the 2017 ACC/AHA guideline. The pair is classified by the
//! higher bucket reached by either value, the standard convention when
//! systolic or diastolic alone crosses a threshold.

use serde::{Deserialize, Serialize};

/// Ordered clinical blood pressure bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpClass {
    /// Systolic < 120 and diastolic < 80
    Normal,
    /// Systolic 120-129 and diastolic < 80
    Elevated,
    /// Systolic 130-139 or diastolic 80-89
    Stage1,
    /// Systolic >= 140 or diastolic >= 90
    Stage2,
    /// Systolic > 180 or diastolic > 120
    Crisis,
}

impl BpClass {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BpClass::Normal => "Normal",
            BpClass::Elevated => "Elevated",
            BpClass::Stage1 => "Hypertension Stage 1",
            BpClass::Stage2 => "Hypertension Stage 2",
            BpClass::Crisis => "Hypertensive Crisis",
        }
    }

    fn from_systolic(systolic: f64) -> Self {
        if systolic > 180.0 {
            BpClass::Crisis
        } else if systolic >= 140.0 {
            BpClass::Stage2
        } else if systolic >= 130.0 {
            BpClass::Stage1
        } else if systolic >= 120.0 {
            BpClass::Elevated
        } else {
            BpClass::Normal
        }
    }

    fn from_diastolic(diastolic: f64) -> Self {
        if diastolic > 120.0 {
            BpClass::Crisis
        } else if diastolic >= 90.0 {
            BpClass::Stage2
        } else if diastolic >= 80.0 {
            BpClass::Stage1
        } else {
            BpClass::Normal
        }
    }
}

impl std::fmt::Display for BpClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Risk level associated with a blood pressure bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No elevated cardiovascular risk
    Low,
    /// Risk of developing hypertension
    Moderate,
    /// Established stage 1 hypertension
    High,
    /// Established stage 2 hypertension
    Severe,
    /// Requires immediate medical attention
    Critical,
}

/// A classified blood pressure pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpCategory {
    /// Clinical bucket
    pub category: BpClass,
    /// Associated risk level
    pub risk: RiskLevel,
}

/// Classify a systolic/diastolic pair into its clinical bucket.
pub fn categorize_bp(systolic_mmhg: f64, diastolic_mmhg: f64) -> BpCategory {
    let category = BpClass::from_systolic(systolic_mmhg).max(BpClass::from_diastolic(diastolic_mmhg));

    let risk = match category {
        BpClass::Normal => RiskLevel::Low,
        BpClass::Elevated => RiskLevel::Moderate,
        BpClass::Stage1 => RiskLevel::High,
        BpClass::Stage2 => RiskLevel::Severe,
        BpClass::Crisis => RiskLevel::Critical,
    };

    BpCategory { category, risk }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal() {
        let result = categorize_bp(112.0, 72.0);
        assert_eq!(result.category, BpClass::Normal);
        assert_eq!(result.risk, RiskLevel::Low);
    }

    #[test]
    fn test_elevated_requires_normal_diastolic() {
        let result = categorize_bp(125.0, 75.0);
        assert_eq!(result.category, BpClass::Elevated);

        // Same systolic with diastolic at 80 is stage 1 by the
        // higher-of-the-two rule
        let result = categorize_bp(125.0, 80.0);
        assert_eq!(result.category, BpClass::Stage1);
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(categorize_bp(130.0, 70.0).category, BpClass::Stage1);
        assert_eq!(categorize_bp(140.0, 70.0).category, BpClass::Stage2);
        assert_eq!(categorize_bp(110.0, 90.0).category, BpClass::Stage2);
    }

    #[test]
    fn test_either_value_reaches_crisis() {
        assert_eq!(categorize_bp(185.0, 80.0).category, BpClass::Crisis);
        assert_eq!(categorize_bp(130.0, 125.0).category, BpClass::Crisis);
        assert_eq!(categorize_bp(185.0, 80.0).risk, RiskLevel::Critical);
    }

    #[test]
    fn test_boundary_values_exclusive_for_crisis() {
        // Exactly 180/120 is stage 2, not crisis
        assert_eq!(categorize_bp(180.0, 120.0).category, BpClass::Stage2);
    }
}

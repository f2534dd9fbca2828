//! Blood pressure estimation from HRV deviation and demographics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CardioError, Result};

/// Systolic anchor at zero HRV deviation, age 30, female (mmHg)
pub const NEUTRAL_SYSTOLIC: f64 = 115.0;
/// Diastolic anchor at zero HRV deviation, age 30, female (mmHg)
pub const NEUTRAL_DIASTOLIC: f64 = 75.0;

/// Systolic mmHg per percent of HRV deficit below baseline
const SYSTOLIC_PER_DEFICIT_PCT: f64 = 0.30;
/// Diastolic mmHg per percent of HRV deficit below baseline
const DIASTOLIC_PER_DEFICIT_PCT: f64 = 0.20;

/// Systolic mmHg per year above the reference age
const SYSTOLIC_PER_YEAR: f64 = 0.5;
/// Diastolic mmHg per year above the reference age
const DIASTOLIC_PER_YEAR: f64 = 0.3;
/// Reference age of the calibration population
const REFERENCE_AGE: f64 = 30.0;

/// Population-level male offset (mmHg systolic / diastolic)
const MALE_SYSTOLIC_OFFSET: f64 = 5.0;
const MALE_DIASTOLIC_OFFSET: f64 = 3.0;

/// Age range of the calibration population; outside it the confidence is
/// downgraded one level
const CALIBRATED_AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=80;

/// Biological sex covariate for the regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    /// Female covariate (the regression anchor)
    Female,
    /// Male covariate
    Male,
}

/// How well the inputs sit inside the calibration population
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateConfidence {
    /// Inputs far from the calibration population
    Low,
    /// Inputs at the edge of the calibration population
    Moderate,
    /// Inputs well inside the calibration population
    High,
}

impl EstimateConfidence {
    fn downgraded(self) -> Self {
        match self {
            EstimateConfidence::High => EstimateConfidence::Moderate,
            _ => EstimateConfidence::Low,
        }
    }
}

/// A systolic/diastolic estimate with its confidence level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BpEstimate {
    /// Estimated systolic pressure (mmHg)
    pub systolic_mmhg: f64,
    /// Estimated diastolic pressure (mmHg)
    pub diastolic_mmhg: f64,
    /// Confidence in the estimate
    pub confidence: EstimateConfidence,
}

/// Estimate blood pressure from the relative deviation between measured and
/// baseline HRV, adjusted by age- and sex-dependent offsets.
///
/// Deterministic: the same inputs always produce the same estimate. At
/// `hrv == baseline_hrv`, age 30, female, the estimate sits at the
/// 115/75 mmHg neutral anchor. HRV below baseline (sympathetic dominance)
/// raises the estimate; outputs are clamped to the plausible 90-200 /
/// 60-130 mmHg bands. Fails with [`CardioError::InvalidBaseline`] when
/// `baseline_hrv` is not a usable divisor.
pub fn estimate_bp(
    hrv: f64,
    baseline_hrv: f64,
    age: u32,
    sex: BiologicalSex,
) -> Result<BpEstimate> {
    if baseline_hrv <= 0.0 {
        return Err(CardioError::InvalidBaseline);
    }

    // Positive when HRV has dropped below baseline
    let deficit_pct = (baseline_hrv - hrv) / baseline_hrv * 100.0;

    let age_years_over = (age as f64 - REFERENCE_AGE).max(0.0);
    let (sex_systolic, sex_diastolic) = match sex {
        BiologicalSex::Female => (0.0, 0.0),
        BiologicalSex::Male => (MALE_SYSTOLIC_OFFSET, MALE_DIASTOLIC_OFFSET),
    };

    let systolic = (NEUTRAL_SYSTOLIC
        + SYSTOLIC_PER_DEFICIT_PCT * deficit_pct
        + SYSTOLIC_PER_YEAR * age_years_over
        + sex_systolic)
        .clamp(90.0, 200.0);
    let diastolic = (NEUTRAL_DIASTOLIC
        + DIASTOLIC_PER_DEFICIT_PCT * deficit_pct
        + DIASTOLIC_PER_YEAR * age_years_over
        + sex_diastolic)
        .clamp(60.0, 130.0);

    let mut confidence = if deficit_pct.abs() <= 15.0 {
        EstimateConfidence::High
    } else if deficit_pct.abs() <= 40.0 {
        EstimateConfidence::Moderate
    } else {
        EstimateConfidence::Low
    };
    if !CALIBRATED_AGE_RANGE.contains(&age) {
        confidence = confidence.downgraded();
    }

    debug!(systolic, diastolic, ?confidence, deficit_pct, "bp estimated");

    Ok(BpEstimate {
        systolic_mmhg: systolic,
        diastolic_mmhg: diastolic,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_anchor() {
        let estimate = estimate_bp(60.0, 60.0, 30, BiologicalSex::Female).unwrap();
        assert_eq!(estimate.systolic_mmhg, 115.0);
        assert_eq!(estimate.diastolic_mmhg, 75.0);
        assert_eq!(estimate.confidence, EstimateConfidence::High);
    }

    #[test]
    fn test_hrv_deficit_raises_pressure() {
        let at_baseline = estimate_bp(60.0, 60.0, 40, BiologicalSex::Male).unwrap();
        let depressed = estimate_bp(45.0, 60.0, 40, BiologicalSex::Male).unwrap();

        assert!(depressed.systolic_mmhg > at_baseline.systolic_mmhg);
        assert!(depressed.diastolic_mmhg > at_baseline.diastolic_mmhg);
    }

    #[test]
    fn test_age_and_sex_offsets() {
        let young_female = estimate_bp(60.0, 60.0, 30, BiologicalSex::Female).unwrap();
        let young_male = estimate_bp(60.0, 60.0, 30, BiologicalSex::Male).unwrap();
        let older_female = estimate_bp(60.0, 60.0, 50, BiologicalSex::Female).unwrap();

        assert_eq!(
            young_male.systolic_mmhg,
            young_female.systolic_mmhg + 5.0
        );
        assert_eq!(
            older_female.systolic_mmhg,
            young_female.systolic_mmhg + 10.0
        );
        // Ages below the reference do not lower the anchor
        let twenty = estimate_bp(60.0, 60.0, 20, BiologicalSex::Female).unwrap();
        assert_eq!(twenty.systolic_mmhg, young_female.systolic_mmhg);
    }

    #[test]
    fn test_confidence_tracks_deviation() {
        let near = estimate_bp(55.0, 60.0, 30, BiologicalSex::Female).unwrap();
        assert_eq!(near.confidence, EstimateConfidence::High);

        let edge = estimate_bp(45.0, 60.0, 30, BiologicalSex::Female).unwrap();
        assert_eq!(edge.confidence, EstimateConfidence::Moderate);

        let far = estimate_bp(20.0, 60.0, 30, BiologicalSex::Female).unwrap();
        assert_eq!(far.confidence, EstimateConfidence::Low);
    }

    #[test]
    fn test_uncalibrated_age_downgrades_confidence() {
        let calibrated = estimate_bp(60.0, 60.0, 30, BiologicalSex::Female).unwrap();
        let uncalibrated = estimate_bp(60.0, 60.0, 92, BiologicalSex::Female).unwrap();

        assert_eq!(calibrated.confidence, EstimateConfidence::High);
        assert_eq!(uncalibrated.confidence, EstimateConfidence::Moderate);
    }

    #[test]
    fn test_zero_baseline_is_rejected() {
        let err = estimate_bp(60.0, 0.0, 30, BiologicalSex::Female).unwrap_err();
        assert!(matches!(err, CardioError::InvalidBaseline));
    }

    #[test]
    fn test_outputs_clamped_to_plausible_bands() {
        // HRV collapsed to near zero: extreme deficit
        let estimate = estimate_bp(1.0, 60.0, 85, BiologicalSex::Male).unwrap();
        assert!(estimate.systolic_mmhg <= 200.0);
        assert!(estimate.diastolic_mmhg <= 130.0);

        // HRV far above baseline: extreme surplus
        let estimate = estimate_bp(300.0, 60.0, 18, BiologicalSex::Female).unwrap();
        assert!(estimate.systolic_mmhg >= 90.0);
        assert!(estimate.diastolic_mmhg >= 60.0);
    }
}

//! Blood pressure estimation and clinical categorization.

mod category;
mod estimator;

pub use category::{categorize_bp, BpCategory, BpClass, RiskLevel};
pub use estimator::{
    estimate_bp, BiologicalSex, BpEstimate, EstimateConfidence, NEUTRAL_DIASTOLIC,
    NEUTRAL_SYSTOLIC,
};

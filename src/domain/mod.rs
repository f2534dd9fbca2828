//! Domain types shared across the processing, scoring, and estimation
//! contexts.

mod reading;
mod sample;
mod vitals;

pub use reading::{Baseline, DailyReading};
pub use sample::{Sample, SignalBuffer};
pub use vitals::{ConfidenceScore, DetectionResult, LOW_CONFIDENCE_THRESHOLD};

//! Detection results produced by the pulse signal processor.

use serde::{Deserialize, Serialize};

/// Confidence below this is considered unactionable; callers should discard
/// the result and re-measure rather than feed it downstream.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.2;

/// Confidence score for a detection (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore(f64);

impl ConfidenceScore {
    /// Create a new confidence score, clamped to [0.0, 1.0]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if confidence is below the actionable threshold
    pub fn is_low(&self) -> bool {
        self.0 < LOW_CONFIDENCE_THRESHOLD
    }
}

impl Default for ConfidenceScore {
    fn default() -> Self {
        Self(0.0)
    }
}

/// Heart rate and HRV extracted from one detection pass over the buffer.
///
/// Computed on demand and never cached by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// RMSSD-style HRV in milliseconds, within the plausible 20-100 ms band
    pub hrv_ms: f64,
    /// Dominant pulse frequency converted to beats per minute
    pub heart_rate_bpm: f64,
    /// Detection confidence derived from filtered-signal variance
    pub confidence: ConfidenceScore,
    /// Raw-signal quality at detection time, 0-1
    pub signal_strength: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamping() {
        assert_eq!(ConfidenceScore::new(1.5).value(), 1.0);
        assert_eq!(ConfidenceScore::new(-0.5).value(), 0.0);
        assert_eq!(ConfidenceScore::new(0.7).value(), 0.7);
    }

    #[test]
    fn test_low_confidence_threshold() {
        assert!(ConfidenceScore::new(0.1).is_low());
        assert!(!ConfidenceScore::new(0.2).is_low());
        assert!(!ConfidenceScore::new(0.9).is_low());
    }
}

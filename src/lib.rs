//! # cardiosense-core
//!
//! Physiological signal processing and scoring for camera-based heart
//! monitoring (remote photoplethysmography).
//!
//! The crate turns a stream of raw optical intensity samples into heart-rate
//! and HRV estimates with a confidence score, combines those with lifestyle
//! signals and a personal baseline into a composite Cardiovascular Stress
//! Score with trend and alert logic, and derives a blood pressure estimate
//! with a clinical-style category from HRV deviation plus demographics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    cardiosense-core                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌───────────┐   ┌──────────────────┐   │
//! │  │ Processing │   │  Scoring  │   │  BP Estimation   │   │
//! │  │  Context   │   │  Context  │   │     Context      │   │
//! │  └─────┬──────┘   └─────┬─────┘   └────────┬─────────┘   │
//! │        └────────────────┼──────────────────┘             │
//! │                 ┌───────▼────────┐                       │
//! │                 │  Domain Types  │                       │
//! │                 └────────────────┘                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The core is a pure, stateless computation layer over caller-supplied
//! sample streams and historical records: it performs no I/O, persists
//! nothing, and recomputation from the same inputs is idempotent. Capture
//! devices, persistence, and any narrative generation live behind the
//! interfaces in [`acquisition`] and the read-only inputs in [`domain`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use cardiosense_core::prelude::*;
//!
//! fn main() -> cardiosense_core::Result<()> {
//!     let processor = PulseSignalProcessor::with_defaults();
//!     processor.start();
//!
//!     // Producer context: one sample per captured frame
//!     for frame in 0..300u64 {
//!         processor.ingest(Sample::new(frame * 33, 128.0));
//!     }
//!
//!     // Consumer context: poll quality, then take a final detection
//!     if processor.signal_quality() > 0.3 {
//!         let detection = processor.detect()?;
//!         println!("{:.0} bpm", detection.heart_rate_bpm);
//!     }
//!     processor.stop();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod acquisition;
pub mod bp;
pub mod domain;
pub mod processing;
pub mod scoring;

pub use acquisition::{AcquisitionSession, ChannelSource, SampleSource};
pub use bp::{
    categorize_bp, estimate_bp, BiologicalSex, BpCategory, BpClass, BpEstimate,
    EstimateConfidence, RiskLevel,
};
pub use domain::{
    Baseline, ConfidenceScore, DailyReading, DetectionResult, Sample, SignalBuffer,
    LOW_CONFIDENCE_THRESHOLD,
};
pub use processing::{ProcessorConfig, ProcessorConfigBuilder, ProcessorState, PulseSignalProcessor};
pub use scoring::{calculate_css, get_health_context, CssResult, HealthContext, Trend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for core operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Unified error type for core operations.
///
/// The numeric core never raises on malformed-but-in-range input; these
/// variants cover the two genuinely unrecoverable-by-computation cases.
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    /// Not enough buffered samples for a detection pass; keep acquiring
    #[error("insufficient data: {buffered} samples buffered, {required} required")]
    InsufficientData {
        /// Samples currently buffered
        buffered: usize,
        /// Samples required before detection is possible
        required: usize,
    },

    /// Baseline HRV is zero or absent; a configuration error, not a
    /// numeric event to propagate as infinity
    #[error("invalid baseline: baseline HRV must be positive")]
    InvalidBaseline,
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        calculate_css, categorize_bp, estimate_bp, get_health_context, AcquisitionSession,
        Baseline, BiologicalSex, BpCategory, BpClass, BpEstimate, CardioError, ChannelSource,
        ConfidenceScore, CssResult, DailyReading, DetectionResult, EstimateConfidence,
        HealthContext, ProcessorConfig, ProcessorState, PulseSignalProcessor, Result, RiskLevel,
        Sample, SampleSource, SignalBuffer, Trend,
    };
}

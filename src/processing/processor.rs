//! The pulse signal processor: sample ingestion, signal quality, and
//! heart-rate / HRV detection over the bounded acquisition window.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::{ConfidenceScore, DetectionResult, Sample, SignalBuffer};
use crate::{CardioError, Result};

use super::filter::{band_limit, std_dev};
use super::spectrum::dominant_frequency;

/// Configuration for the pulse signal processor
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Nominal capture rate of the device (Hz)
    pub sample_rate_hz: f64,
    /// Capacity of the acquisition window (samples)
    pub max_samples: usize,
    /// Minimum buffered samples before detection is possible
    pub min_samples: usize,
    /// Low edge of the physiological passband (Hz)
    pub passband_low_hz: f64,
    /// High edge of the physiological passband (Hz)
    pub passband_high_hz: f64,
    /// Window over the raw signal used for quality estimation (samples)
    pub quality_window: usize,
    /// Empirical divisor normalizing raw-signal variance into [0,1]
    pub quality_divisor: f64,
    /// Empirical divisor normalizing filtered-signal variance into [0,1]
    pub confidence_divisor: f64,
    /// Heart rate reported when the passband spectrum is flat (bpm)
    pub fallback_bpm: f64,
    /// HRV reported when the filtered signal is too short to difference (ms)
    pub default_hrv_ms: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 30.0,
            max_samples: 300, // ~10 s at 30 Hz
            min_samples: 90,  // ~3 s at 30 Hz
            passband_low_hz: 0.7,
            passband_high_hz: 4.0, // 42-240 bpm
            quality_window: 30,
            quality_divisor: 5.0,
            confidence_divisor: 10.0,
            fallback_bpm: 72.0,
            default_hrv_ms: 50.0,
        }
    }
}

impl ProcessorConfig {
    /// Create a new configuration builder
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::default()
    }
}

/// Builder for [`ProcessorConfig`]
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Set the nominal capture rate
    pub fn sample_rate_hz(mut self, rate: f64) -> Self {
        self.config.sample_rate_hz = rate.max(1.0);
        self
    }

    /// Set the acquisition window capacity
    pub fn max_samples(mut self, max: usize) -> Self {
        self.config.max_samples = max.max(1);
        self
    }

    /// Set the minimum sample count required for detection
    pub fn min_samples(mut self, min: usize) -> Self {
        self.config.min_samples = min.max(2);
        self
    }

    /// Set the physiological passband
    pub fn passband_hz(mut self, low: f64, high: f64) -> Self {
        self.config.passband_low_hz = low.max(0.01);
        self.config.passband_high_hz = high.max(self.config.passband_low_hz);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

/// Acquisition state of the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    /// No acquisition in progress
    Idle,
    /// Samples are flowing but detection is not yet possible
    Acquiring,
    /// Enough samples are buffered for detection
    Ready,
}

/// Turns a stream of camera intensity samples into heart-rate and HRV
/// estimates with a confidence score.
///
/// `ingest` is called from the producer context at the device frame rate;
/// `detect` and `signal_quality` from a separate consumer context. Buffer
/// access is synchronized with a read-write lock so the window is never
/// mutated mid-read. Detection is computed on demand and never cached.
pub struct PulseSignalProcessor {
    config: ProcessorConfig,
    buffer: RwLock<SignalBuffer>,
    acquiring: AtomicBool,
}

impl PulseSignalProcessor {
    /// Create a new processor
    pub fn new(config: ProcessorConfig) -> Self {
        let buffer = RwLock::new(SignalBuffer::new(config.max_samples));
        Self {
            config,
            buffer,
            acquiring: AtomicBool::new(false),
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ProcessorConfig::default())
    }

    /// Begin an acquisition session
    pub fn start(&self) {
        self.acquiring.store(true, Ordering::SeqCst);
    }

    /// End the acquisition session, discarding the in-flight buffer.
    ///
    /// The buffer is never flushed into a partial result.
    pub fn stop(&self) {
        self.acquiring.store(false, Ordering::SeqCst);
        self.buffer.write().clear();
    }

    /// Current acquisition state
    pub fn state(&self) -> ProcessorState {
        if !self.acquiring.load(Ordering::SeqCst) {
            return ProcessorState::Idle;
        }
        if self.buffer.read().len() >= self.config.min_samples {
            ProcessorState::Ready
        } else {
            ProcessorState::Acquiring
        }
    }

    /// Append one sample to the acquisition window.
    ///
    /// O(1) amortized, no failure mode; safe to call at the device's native
    /// frame rate.
    pub fn ingest(&self, sample: Sample) {
        self.buffer.write().push(sample);
    }

    /// Number of currently buffered samples
    pub fn buffered(&self) -> usize {
        self.buffer.read().len()
    }

    /// Estimate raw signal quality in [0,1].
    ///
    /// Returns 0.0 below 10 buffered samples. Otherwise the standard
    /// deviation of the most recent ~1 s of raw intensities, normalized by
    /// an empirical divisor. Higher variance reads as a stronger pulse: a
    /// motionless flat stream indicates poor contact or absent perfusion.
    pub fn signal_quality(&self) -> f64 {
        let buffer = self.buffer.read();
        if buffer.len() < 10 {
            return 0.0;
        }

        let recent = buffer.recent_intensities(self.config.quality_window);
        (std_dev(&recent) / self.config.quality_divisor).clamp(0.0, 1.0)
    }

    /// Run one detection pass over the buffered signal.
    ///
    /// Fails with [`CardioError::InsufficientData`] until `min_samples`
    /// samples are buffered; the caller should keep acquiring and retry.
    pub fn detect(&self) -> Result<DetectionResult> {
        let (raw, quality) = {
            let buffer = self.buffer.read();
            if buffer.len() < self.config.min_samples {
                return Err(CardioError::InsufficientData {
                    buffered: buffer.len(),
                    required: self.config.min_samples,
                });
            }
            let recent = buffer.recent_intensities(self.config.quality_window);
            let quality = (std_dev(&recent) / self.config.quality_divisor).clamp(0.0, 1.0);
            (buffer.intensities(), quality)
        };

        let filtered = band_limit(
            &raw,
            self.config.sample_rate_hz,
            self.config.passband_low_hz,
            self.config.passband_high_hz,
        );

        let heart_rate_bpm = self.extract_heart_rate(&filtered);
        let hrv_ms = self.estimate_hrv(&filtered);
        let confidence =
            ConfidenceScore::new(std_dev(&filtered) / self.config.confidence_divisor);

        debug!(
            heart_rate_bpm,
            hrv_ms,
            confidence = confidence.value(),
            samples = raw.len(),
            "detection pass complete"
        );

        Ok(DetectionResult {
            hrv_ms,
            heart_rate_bpm,
            confidence,
            signal_strength: quality,
        })
    }

    /// Dominant passband frequency converted to bpm, with a documented
    /// fallback when the passband spectrum carries no energy
    fn extract_heart_rate(&self, filtered: &[f64]) -> f64 {
        match dominant_frequency(
            filtered,
            self.config.sample_rate_hz,
            self.config.passband_low_hz,
            self.config.passband_high_hz,
        ) {
            Some((freq_hz, _)) => freq_hz * 60.0,
            None => {
                warn!(
                    fallback_bpm = self.config.fallback_bpm,
                    "flat passband spectrum, using fallback heart rate"
                );
                self.config.fallback_bpm
            }
        }
    }

    /// RMSSD-style HRV: the spread of absolute successive differences of
    /// the filtered signal, linearly rescaled into the plausible 20-100 ms
    /// physiological band
    fn estimate_hrv(&self, filtered: &[f64]) -> f64 {
        if filtered.len() < 2 {
            return self.config.default_hrv_ms;
        }

        let diffs: Vec<f64> = filtered.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
        let rms = std_dev(&diffs);

        (20.0 + 40.0 * rms).clamp(20.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_sine(processor: &PulseSignalProcessor, freq_hz: f64, num_samples: usize) {
        let rate = processor.config.sample_rate_hz;
        for i in 0..num_samples {
            let t = i as f64 / rate;
            let intensity = 128.0 + 4.0 * (2.0 * std::f64::consts::PI * freq_hz * t).sin();
            processor.ingest(Sample::new((t * 1000.0) as u64, intensity));
        }
    }

    #[test]
    fn test_detect_requires_min_samples() {
        let processor = PulseSignalProcessor::with_defaults();
        feed_sine(&processor, 1.2, 50);

        let err = processor.detect().unwrap_err();
        assert!(matches!(
            err,
            CardioError::InsufficientData {
                buffered: 50,
                required: 90
            }
        ));
    }

    #[test]
    fn test_detects_72_bpm_pulse() {
        let processor = PulseSignalProcessor::with_defaults();
        feed_sine(&processor, 1.2, 300);

        let result = processor.detect().unwrap();
        assert!(
            (result.heart_rate_bpm - 72.0).abs() <= 5.0,
            "got {} bpm",
            result.heart_rate_bpm
        );
        assert!(result.hrv_ms >= 20.0 && result.hrv_ms <= 100.0);
    }

    #[test]
    fn test_flat_signal_falls_back_to_default_bpm() {
        let processor = PulseSignalProcessor::with_defaults();
        for i in 0..300 {
            processor.ingest(Sample::new(i * 33, 128.0));
        }

        let result = processor.detect().unwrap();
        assert_eq!(result.heart_rate_bpm, 72.0);
        assert!(result.confidence.is_low());
    }

    #[test]
    fn test_signal_quality_needs_ten_samples() {
        let processor = PulseSignalProcessor::with_defaults();
        feed_sine(&processor, 1.2, 9);
        assert_eq!(processor.signal_quality(), 0.0);

        feed_sine(&processor, 1.2, 30);
        assert!(processor.signal_quality() > 0.0);
    }

    #[test]
    fn test_quality_clamped_to_one() {
        let processor = PulseSignalProcessor::with_defaults();
        for i in 0..30 {
            let intensity = if i % 2 == 0 { 0.0 } else { 200.0 };
            processor.ingest(Sample::new(i * 33, intensity));
        }
        assert_eq!(processor.signal_quality(), 1.0);
    }

    #[test]
    fn test_stop_discards_buffer() {
        let processor = PulseSignalProcessor::with_defaults();
        processor.start();
        feed_sine(&processor, 1.2, 120);
        assert_eq!(processor.state(), ProcessorState::Ready);

        processor.stop();
        assert_eq!(processor.state(), ProcessorState::Idle);
        assert_eq!(processor.buffered(), 0);
        assert!(processor.detect().is_err());
    }

    #[test]
    fn test_state_transitions() {
        let processor = PulseSignalProcessor::with_defaults();
        assert_eq!(processor.state(), ProcessorState::Idle);

        processor.start();
        assert_eq!(processor.state(), ProcessorState::Acquiring);

        feed_sine(&processor, 1.2, 90);
        assert_eq!(processor.state(), ProcessorState::Ready);
    }

    #[test]
    fn test_buffer_ring_eviction() {
        let processor = PulseSignalProcessor::with_defaults();
        feed_sine(&processor, 1.2, 450);
        assert_eq!(processor.buffered(), 300);
    }

    #[test]
    fn test_config_builder_clamps() {
        let config = ProcessorConfig::builder()
            .sample_rate_hz(0.0)
            .min_samples(0)
            .passband_hz(2.0, 1.0)
            .build();

        assert_eq!(config.sample_rate_hz, 1.0);
        assert_eq!(config.min_samples, 2);
        assert!(config.passband_high_hz >= config.passband_low_hz);
    }
}

//! Raw optical samples and the bounded acquisition window.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One optical intensity reading captured from a single camera frame.
///
/// Samples are ephemeral: they live in the acquisition window until evicted
/// or until the session stops, and are never persisted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Capture timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Mean channel intensity of the frame
    pub intensity: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp_ms: u64, intensity: f64) -> Self {
        Self {
            timestamp_ms,
            intensity,
        }
    }
}

/// Insertion-ordered window of samples with a fixed capacity.
///
/// Once the capacity is exceeded the oldest sample is evicted, so the buffer
/// always holds the most recent `capacity` samples (ring semantics).
#[derive(Debug, Clone)]
pub struct SignalBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SignalBuffer {
    /// Create an empty buffer with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the buffer is full
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Number of buffered samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples the buffer will hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all buffered samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Intensity values in insertion order, oldest first
    pub fn intensities(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.intensity).collect()
    }

    /// Intensity values of the most recent `n` samples, oldest first
    pub fn recent_intensities(&self, n: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).map(|s| s.intensity).collect()
    }
}

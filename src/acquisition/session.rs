//! Session driver pumping capture-adapter samples into the processor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::domain::Sample;
use crate::processing::PulseSignalProcessor;

/// Source of timestamped intensity samples at an approximately fixed rate.
///
/// Implemented by capture adapters; the core has no knowledge of the camera
/// behind it.
#[async_trait]
pub trait SampleSource: Send {
    /// Next sample, or `None` once the source is exhausted
    async fn next_sample(&mut self) -> Option<Sample>;
}

/// Source backed by a bounded channel, for adapters that push frames from
/// their own capture callback.
pub struct ChannelSource {
    receiver: mpsc::Receiver<Sample>,
}

impl ChannelSource {
    /// Create a channel-backed source along with its sending half
    pub fn new(capacity: usize) -> (mpsc::Sender<Sample>, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        (sender, Self { receiver })
    }
}

#[async_trait]
impl SampleSource for ChannelSource {
    async fn next_sample(&mut self) -> Option<Sample> {
        self.receiver.recv().await
    }
}

/// Drives one capture session: ingests samples from a source until the
/// source ends or the session is stopped.
///
/// Stopping at any time discards the in-flight buffer; a partial window is
/// never flushed into a result. The caller imposes the wall-clock capture
/// duration and decides when to ask the processor for a final detection.
pub struct AcquisitionSession {
    processor: Arc<PulseSignalProcessor>,
    running: AtomicBool,
}

impl AcquisitionSession {
    /// Create a session over the given processor
    pub fn new(processor: Arc<PulseSignalProcessor>) -> Self {
        Self {
            processor,
            running: AtomicBool::new(false),
        }
    }

    /// Run the ingest loop until the source is exhausted or `stop` is
    /// called. Returns the number of samples ingested.
    pub async fn run<S: SampleSource>(&self, mut source: S) -> usize {
        self.running.store(true, Ordering::SeqCst);
        self.processor.start();
        info!("acquisition session started");

        let mut ingested = 0usize;
        while self.running.load(Ordering::SeqCst) {
            match source.next_sample().await {
                Some(sample) => {
                    self.processor.ingest(sample);
                    ingested += 1;
                }
                None => {
                    debug!(ingested, "sample source exhausted");
                    break;
                }
            }
        }

        info!(ingested, "acquisition session ended");
        ingested
    }

    /// Stop the session and discard the in-flight buffer
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.processor.stop();
    }

    /// Whether the ingest loop is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The processor this session feeds
    pub fn processor(&self) -> &Arc<PulseSignalProcessor> {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ProcessorState;

    fn pulse_sample(i: usize) -> Sample {
        let t = i as f64 / 30.0;
        let intensity = 128.0 + 4.0 * (2.0 * std::f64::consts::PI * 1.2 * t).sin();
        Sample::new((t * 1000.0) as u64, intensity)
    }

    #[tokio::test]
    async fn test_session_ingests_until_source_ends() {
        let processor = Arc::new(PulseSignalProcessor::with_defaults());
        let session = AcquisitionSession::new(Arc::clone(&processor));

        let (sender, source) = ChannelSource::new(32);
        let feeder = tokio::spawn(async move {
            for i in 0..120 {
                sender.send(pulse_sample(i)).await.unwrap();
            }
            // Dropping the sender ends the source
        });

        let ingested = session.run(source).await;
        feeder.await.unwrap();

        assert_eq!(ingested, 120);
        assert_eq!(processor.buffered(), 120);
        assert!(processor.detect().is_ok());
    }

    #[tokio::test]
    async fn test_stop_discards_in_flight_buffer() {
        let processor = Arc::new(PulseSignalProcessor::with_defaults());
        let session = Arc::new(AcquisitionSession::new(Arc::clone(&processor)));

        // Capacity must hold all queued samples: they are sent before the
        // runner task exists, so a smaller bound would deadlock the test.
        let (sender, source) = ChannelSource::new(128);
        for i in 0..100 {
            sender.send(pulse_sample(i)).await.unwrap();
        }

        let runner = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.run(source).await })
        };

        // Let the loop drain the queued samples, then cancel mid-capture
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        session.stop();
        drop(sender);
        runner.await.unwrap();

        assert_eq!(processor.state(), ProcessorState::Idle);
        assert_eq!(processor.buffered(), 0);
        assert!(!session.is_running());
    }
}

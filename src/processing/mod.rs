//! Pulse signal processing: band-limiting, spectral peak extraction, and
//! the processor that ties them to the acquisition window.

mod filter;
mod processor;
mod spectrum;

pub use filter::{band_limit, mean, moving_average, std_dev};
pub use processor::{
    ProcessorConfig, ProcessorConfigBuilder, ProcessorState, PulseSignalProcessor,
};
pub use spectrum::dominant_frequency;

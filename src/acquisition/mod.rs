//! Acquisition plumbing between a capture adapter and the processor.
//!
//! The capture device itself (camera access, permissions, illumination) is
//! external; this module only drives the sample stream it produces.

mod session;

pub use session::{AcquisitionSession, ChannelSource, SampleSource};

//! Adaptive-prediction codec engines for retro console sample formats.
//!
//! Each codec keeps its adaptive state in an explicit struct owned by the
//! caller, so independent streams never interfere and decoding can be fed
//! in arbitrary block sizes: splitting the input across multiple calls
//! produces byte-identical output to a single call.

pub mod adpcm_a;
pub mod adpcm_b;
pub mod dsp;

pub use adpcm_a::AdpcmADecoder;
pub use adpcm_b::{AdpcmBDecoder, AdpcmBEncoder, delta_t_to_sample_rate};
pub use dsp::DspContext;

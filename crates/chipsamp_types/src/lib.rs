//! Core codec engines and file format support for the `chipsamp-rs` project.
//!
//! # Codecs
//!
//! - **ADPCM-A**: YM2610 ADPCM-A decoder (Neo Geo sample ROM format)
//! - **ADPCM-B**: YM2610/YM2608 ADPCM-B encoder and decoder
//! - **DSP-ADPCM**: GameCube DSP coefficient-driven ADPCM decoder
//!
//! # File formats
//!
//! - **WAVE**: canonical little-endian RIFF/WAVE reading and writing,
//!   including `smpl` sampler loop metadata
//! - **AIFF**: incremental big-endian AIFF chunk writer with streamed
//!   sound data and deferred or precomputed sizes
//! - **DSP**: GameCube `.dsp` sample files (header + ADPCM payload)
//! - **VGM**: scanner for ADPCM sample blocks embedded in VGM logs
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use chipsamp_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Decode an ADPCM-A sample ripped from a Neo Geo ROM
//! let adpcm = std::fs::read("sample.pcma")?;
//! let mut decoder = AdpcmADecoder::new();
//! let pcm = decoder.decode(&adpcm);
//!
//! // Convert a sampler-looped WAVE file to AIFF
//! let mut wav = std::fs::File::open("input.wav")?;
//! let aif = std::fs::File::create("output.aif")?;
//! wave_to_aiff(&mut wav, aif)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod convert;
pub mod file;

/// `use chipsamp_types::prelude::*;` to import commonly used items.
pub mod prelude;

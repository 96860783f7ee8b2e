//! RIFF/WAVE reading and writing support.
//!
//! WAVE is the little-endian branch of the IFF chunk family. The writer
//! covers the converter output path: a canonical `fmt ` chunk, an optional
//! `smpl` sampler chunk and a `data` chunk whose size is known up front.
//! The reader is a linear chunk walk that harvests the format description,
//! the raw sample payload location and up to two sampler loops, which is
//! everything the AIFF conversion pipeline needs.
//!
//! # Examples
//!
//! ```no_run
//! use chipsamp_types::file::wave::{self, WaveSpec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Inspect an existing file
//! let mut file = std::fs::File::open("input.wav")?;
//! let info = wave::read_info(&mut file)?;
//! println!("{} Hz, {} channels", info.format.sample_rate, info.format.channels);
//!
//! // Write a mono 16-bit file
//! let spec = WaveSpec {
//! 	format: wave::FORMAT_PCM,
//! 	channels: 1,
//! 	rate: 22050,
//! 	byte_depth: 2,
//! };
//! let samples: Vec<u8> = vec![0; 44100];
//! let mut out = std::fs::File::create("output.wav")?;
//! wave::write(&spec, &samples, &mut out)?;
//! # Ok(())
//! # }
//! ```

mod reader;
mod types;
mod writer;

pub use reader::read_info;
pub use types::{
	FORMAT_PCM, FormatChunk, SamplerChunk, SamplerInfo, SamplerLoop, SamplerLoopType, WaveSpec,
};
pub use writer::{write, write_header, write_planar};

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

/// Everything the chunk walk harvests from a WAVE file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveInfo {
	/// Contents of the `fmt ` chunk
	pub format: FormatChunk,
	/// Byte offset of the `data` chunk payload
	pub data_offset: u64,
	/// Byte length of the `data` chunk payload
	pub data_len: u32,
	/// Sampler metadata, when a `smpl` chunk is present
	pub sampler: Option<SamplerInfo>,
}

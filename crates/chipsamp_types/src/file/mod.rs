//! File format support for the `chipsamp-rs` project.

mod error;

pub mod aiff;
pub mod dsp;
pub mod vgm;
pub mod wave;

/// Size of an IFF chunk header (4-byte tag + 4-byte size)
pub const IFF_CHUNK_HEAD_SIZE: u32 = 8;

/// Rounds a chunk size up to the even byte boundary IFF mandates.
pub const fn iff_real_size(size: u32) -> u32 {
	(size + 1) & !1
}

// Re-export unified error types
pub use error::{AiffError, ConvertError, DspError, VgmError, WaveError};

// Re-export main file types
pub use aiff::{AiffWriter, ChunkKind, Extended, Instrument, Loop, Marker, PlayMode};
pub use dsp::DspFile;
pub use vgm::{AdpcmKind, VgmScanner};
pub use wave::{FormatChunk, SamplerInfo, SamplerLoop, WaveInfo, WaveSpec};

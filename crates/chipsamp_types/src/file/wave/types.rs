//! Data type definitions for WAVE chunks.

use serde::{Deserialize, Serialize};

/// Format tag for uncompressed PCM
pub const FORMAT_PCM: u16 = 0x0001;

/// Size of the canonical `fmt ` chunk payload in bytes
pub(super) const FORMAT_CHUNK_SIZE: u32 = 16;

/// Size of the fixed `smpl` chunk head in bytes
pub(super) const SAMPLER_CHUNK_HEAD_SIZE: u32 = 36;

/// Size of one sampler loop record in bytes
pub(super) const SAMPLER_LOOP_SIZE: u32 = 24;

/// Output parameters for the WAVE writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveSpec {
	/// Format tag ([`FORMAT_PCM`] is the only supported value)
	pub format: u16,
	/// Number of interleaved channels
	pub channels: u16,
	/// Sample rate in Hz
	pub rate: u32,
	/// Bytes per sample, 1 to 4
	pub byte_depth: u16,
}

/// Contents of the canonical 16-byte `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatChunk {
	/// Compression format tag (1 = PCM)
	pub format_tag: u16,
	/// Number of interleaved channels
	pub channels: u16,
	/// Sample rate in Hz
	pub sample_rate: u32,
	/// Average bytes per second, for buffer estimation
	pub byte_rate: u32,
	/// Bytes per sample frame across all channels
	pub block_align: u16,
	/// Bits per sample
	pub bit_depth: u16,
}

/// Sampler loop types from the `smpl` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplerLoopType {
	/// Loop plays forward
	Forward,
	/// Loop alternates forward and backward
	Bidirectional,
	/// Loop plays backward
	Reverse,
	/// A vendor-specific or unknown type code
	Unknown(u32),
}

impl From<u32> for SamplerLoopType {
	fn from(value: u32) -> Self {
		match value {
			0 => Self::Forward,
			1 => Self::Bidirectional,
			2 => Self::Reverse,
			other => Self::Unknown(other),
		}
	}
}

/// One loop record from the `smpl` chunk.
///
/// Both `start` and `end` are frame positions and the end frame is
/// *inclusive*, unlike AIFF markers which fall between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerLoop {
	/// Loop identifier
	pub id: u32,
	/// How the loop plays back
	pub loop_type: SamplerLoopType,
	/// First frame of the loop
	pub start: u32,
	/// Last frame of the loop, inclusive
	pub end: u32,
	/// Fractional loop tuning
	pub fraction: u32,
	/// Times to play the loop, 0 = infinite
	pub play_count: u32,
}

/// Fixed head of the `smpl` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerChunk {
	/// MIDI manufacturer code, 0 when unused
	pub manufacturer: u32,
	/// MIDI product code, 0 when unused
	pub product: u32,
	/// Sample period in nanoseconds
	pub sample_period: i32,
	/// MIDI note at which the sample plays back unmodified
	pub midi_unity_note: i32,
	/// Fraction of a semitone above the unity note
	pub midi_pitch_frac: i32,
	/// SMPTE timecode format
	pub smpte_format: i32,
	/// SMPTE offset for synchronization
	pub smpte_offset: u32,
	/// Number of loops declared in the chunk
	pub loop_count: u32,
	/// Bytes of vendor data following the loops
	pub vendor_data: u32,
}

/// Sampler metadata harvested by the reader: the chunk head plus at most
/// two loop records (additional declared loops are skipped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerInfo {
	/// Fixed chunk head
	pub chunk: SamplerChunk,
	/// Up to two loop records
	pub loops: Vec<SamplerLoop>,
}

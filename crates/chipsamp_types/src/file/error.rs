//! Error types for container parsing and serialization.

use thiserror::Error;

use super::aiff::ChunkKind;

/// Errors that can occur when reading or writing RIFF/WAVE files
#[derive(Debug, Error)]
pub enum WaveError {
	/// Outer container magic is not "RIFF"
	#[error("Invalid RIFF magic: {0:02X?}")]
	InvalidMagic([u8; 4]),

	/// RIFF form type is not "WAVE"
	#[error("Not a WAVE file, form type: {0:02X?}")]
	NotWave([u8; 4]),

	/// Declared RIFF size cannot hold the mandatory chunks
	#[error("Declared RIFF size {declared} is shorter than the {min} byte minimum")]
	DeclaredSizeTooSmall {
		/// Size declared in the RIFF header
		declared: u32,
		/// Minimum size a WAVE file can declare
		min: u32,
	},

	/// Format chunk has an unexpected size
	#[error("Unsupported format chunk size {0} (expected 16)")]
	UnsupportedFormatChunk(u32),

	/// A mandatory chunk was never seen during the walk
	#[error("Missing {0:?} chunk")]
	MissingChunk(&'static str),

	/// Sampler chunk is smaller than its fixed header or its declared loops
	#[error("Malformed sampler chunk: size {size}, declared loops {loops}")]
	MalformedSamplerChunk {
		/// Declared chunk size in bytes
		size: u32,
		/// Declared sampler loop count
		loops: u32,
	},

	/// Compressed or otherwise unsupported format tag
	#[error("Unsupported format tag {0:#06X} (only uncompressed PCM)")]
	UnsupportedFormat(u16),

	/// Channel count outside the representable range
	#[error("Unsupported channel count {0}")]
	UnsupportedChannels(u16),

	/// Bit depth outside `1..=32`
	#[error("Unsupported bit depth {0}")]
	UnsupportedBitDepth(u16),

	/// Data payload missing or too large for a 32-bit chunk size
	#[error("Invalid data length {0}")]
	InvalidDataLength(u64),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors that can occur when writing AIFF files
#[derive(Debug, Error)]
pub enum AiffError {
	/// Each chunk kind may only be written once per file
	#[error("{0:?} chunk has already been written")]
	ChunkAlreadyWritten(ChunkKind),

	/// Size precalculation is only valid on a pristine writer
	#[error("FORM size cannot be precalculated after chunks have been written")]
	PrecalcAfterWrite,

	/// Accumulated chunk sizes no longer fit a 32-bit FORM size
	#[error("FORM size {0} exceeds the 32-bit chunk size limit")]
	FormTooLarge(u64),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors that can occur when parsing GameCube `.dsp` files
#[derive(Debug, Error)]
pub enum DspError {
	/// Loop flag must be 0 or 1
	#[error("Unsupported loop flag {0}")]
	UnsupportedLoopFlag(u16),

	/// Format field is reserved and must be zero
	#[error("Unsupported format {0} (only plain DSP-ADPCM)")]
	UnsupportedFormat(u16),

	/// ADPCM payload shorter than the header promises
	#[error("Insufficient sample data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Bytes required by the declared sample count
		expected: usize,
		/// Bytes actually present
		actual: usize,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors that can occur when scanning VGM streams for sample blocks
#[derive(Debug, Error)]
pub enum VgmError {
	/// Data block too short to hold the ROM size/offset preamble
	#[error("Sample block length {0} is shorter than the 8 byte preamble")]
	BlockTooShort(u32),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors that can occur during WAVE to AIFF conversion
#[derive(Debug, Error)]
pub enum ConvertError {
	/// Reading the source WAVE failed
	#[error(transparent)]
	Wave(#[from] WaveError),

	/// Writing the target AIFF failed
	#[error(transparent)]
	Aiff(#[from] AiffError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

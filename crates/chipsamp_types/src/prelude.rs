//! Prelude module for `chipsamp_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use chipsamp_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut decoder = AdpcmADecoder::new();
//! let mut encoder = AdpcmBEncoder::new();
//! ```

// Codec engines
#[doc(inline)]
pub use crate::codec::{
	// ADPCM-A (YM2610 rhythm channels)
	AdpcmADecoder,

	// ADPCM-B (YM2610/YM2608 DeltaT channel)
	AdpcmBDecoder,
	AdpcmBEncoder,
	delta_t_to_sample_rate,

	// GameCube DSP-ADPCM
	DspContext,
};

// File format types
#[doc(inline)]
pub use crate::file::{
	// AIFF writing
	AiffWriter,
	ChunkKind,
	Instrument,
	Loop,
	Marker,
	PlayMode,

	// GameCube .dsp files
	DspFile,

	// VGM sample block extraction
	AdpcmKind,
	VgmScanner,

	// WAVE reading and writing
	SamplerInfo,
	SamplerLoop,
	WaveInfo,
	WaveSpec,

	// Unified error types
	AiffError,
	ConvertError,
	DspError,
	VgmError,
	WaveError,
};

// Conversion pipeline
#[doc(inline)]
pub use crate::convert::{derive_loop_markers, wave_to_aiff};

// Re-export the modules for advanced usage
#[doc(inline)]
pub use crate::codec;
#[doc(inline)]
pub use crate::file;

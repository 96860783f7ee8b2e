//! Data type definitions for AIFF chunks.

/// Size of the `COMM` chunk payload in bytes
pub(super) const COMMON_SIZE: u32 = 18;

/// Size of the `SSND` chunk's offset/block-size prefix in bytes
pub(super) const SOUND_DATA_HEAD_SIZE: u32 = 8;

/// Size of one instrument loop record in bytes
pub(super) const LOOP_SIZE: u32 = 6;

/// Size of the `INST` chunk payload in bytes
pub(super) const INSTRUMENT_SIZE: u32 = 8 + 2 * LOOP_SIZE;

/// The chunk kinds the writer knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
	/// `FORM` umbrella header
	Form,
	/// `COMM` common chunk
	Common,
	/// `SSND` sound data chunk
	SoundData,
	/// `MARK` marker chunk
	Markers,
	/// `INST` instrument chunk
	Instrument,
}

impl ChunkKind {
	/// Four-character chunk tag.
	pub fn fourcc(self) -> &'static [u8; 4] {
		match self {
			Self::Form => b"FORM",
			Self::Common => b"COMM",
			Self::SoundData => b"SSND",
			Self::Markers => b"MARK",
			Self::Instrument => b"INST",
		}
	}

	pub(super) fn bit(self) -> u8 {
		match self {
			Self::Form => 1 << 0,
			Self::Common => 1 << 1,
			Self::SoundData => 1 << 2,
			Self::Markers => 1 << 3,
			Self::Instrument => 1 << 4,
		}
	}
}

/// A named frame position in the sound data.
///
/// Marker positions fall *between* frames: position `n` sits before frame
/// `n`, so a loop end marker at the frame count marks the end of the sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	/// Marker id, referenced by instrument loops (ids start at 1)
	pub id: i16,
	/// Frame position
	pub position: u32,
	/// Marker name, truncated to 255 bytes when written
	pub name: String,
}

impl Marker {
	/// Creates a marker.
	pub fn new(id: i16, position: u32, name: impl Into<String>) -> Self {
		Self {
			id,
			position,
			name: name.into(),
		}
	}

	/// Serialized size of this marker: id + position + pascal string
	/// (length byte, name bytes, even padding).
	pub(super) fn chunk_size(&self) -> u32 {
		6 + ((2 + self.name.len().min(0xFF) as u32) & !1)
	}
}

/// Instrument loop play modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
	/// No looping
	#[default]
	Off = 0,
	/// Loop playing forward
	Forward = 1,
	/// Loop playing forward then backward
	Reverse = 2,
}

/// An instrument loop, bounded by two marker ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loop {
	/// How the looped section plays back
	pub play_mode: PlayMode,
	/// Marker id of the loop start
	pub begin: i16,
	/// Marker id of the loop end
	pub end: i16,
}

/// The `INST` chunk: how a sampler should play the sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
	/// MIDI note at which the sample plays back unmodified
	pub base_note: i8,
	/// Pitch detune in cents (50 = 1/2 semitone)
	pub detune: i8,
	/// Lowest MIDI note the sample should play, 0-127
	pub low_note: i8,
	/// Highest MIDI note the sample should play, 0-127
	pub high_note: i8,
	/// Lowest MIDI velocity the sample should play, 1-127
	pub low_velocity: i8,
	/// Highest MIDI velocity the sample should play, 1-127
	pub high_velocity: i8,
	/// Gain adjustment in dB
	pub gain: i16,
	/// Loop held while the key is down
	pub sustain_loop: Loop,
	/// Loop played after key release
	pub release_loop: Loop,
}

impl Default for Instrument {
	fn default() -> Self {
		Self {
			base_note: 60,
			detune: 0,
			low_note: 0,
			high_note: 127,
			low_velocity: 1,
			high_velocity: 127,
			gain: 0,
			sustain_loop: Loop::default(),
			release_loop: Loop::default(),
		}
	}
}

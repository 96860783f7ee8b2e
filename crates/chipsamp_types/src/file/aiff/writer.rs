//! Incremental AIFF chunk writer.

use std::io::{Seek, SeekFrom, Write};

use super::extended::Extended;
use super::types::{
	COMMON_SIZE, ChunkKind, INSTRUMENT_SIZE, Instrument, Marker, SOUND_DATA_HEAD_SIZE,
};
use crate::file::{AiffError, IFF_CHUNK_HEAD_SIZE, iff_real_size};

/// Where the writer stands between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
	/// No bytes written yet; the FORM header is still pending
	Empty,
	/// A chunk header has been emitted and its payload may still grow
	Chunk {
		/// Kind of the open chunk
		kind: ChunkKind,
		/// Payload bytes written so far (excluding the chunk header)
		size: u64,
	},
	/// The open chunk has been folded into the running totals
	Flushed,
}

/// Streaming AIFF writer over a seekable byte sink.
///
/// The writer owns the sink for its lifetime and hands it back on
/// [`close`](Self::close). Chunks may be written in any order; each kind at
/// most once, except that [`write_sound_frames`](Self::write_sound_frames)
/// may be called repeatedly to append into a single `SSND` chunk without
/// buffering the whole sample in memory.
///
/// When [`precalculate_form_size`](Self::precalculate_form_size) is called
/// before the first write, every size field is emitted final and no seeking
/// happens; otherwise the `SSND` and `FORM` sizes are patched by seeking
/// back when the chunk is flushed and on close. Both paths produce
/// byte-identical files.
#[derive(Debug)]
pub struct AiffWriter<W: Write + Seek> {
	stream: W,
	/// Bitmask of chunk kinds already completed
	written: u8,
	state: WriterState,
	/// Offset of the SSND chunk header, for the deferred size patch
	sound_data_offset: u64,
	/// Precomputed MARK payload size, 0 when unknown
	marker_chunk_size: u32,
	/// Precomputed SSND payload size, 0 when unknown
	sound_chunk_size: u32,
	/// Precomputed FORM size, 0 when deferred to close
	form_size: u32,
	/// Running FORM size for the deferred path
	written_chunks_size: u64,
}

fn marker_chunk_size(markers: &[Marker]) -> u32 {
	2 + markers.iter().map(Marker::chunk_size).sum::<u32>()
}

impl<W: Write + Seek> AiffWriter<W> {
	/// Wraps a byte sink; nothing is written until the first chunk call.
	pub fn new(stream: W) -> Self {
		Self {
			stream,
			written: 0,
			state: WriterState::Empty,
			sound_data_offset: 0,
			marker_chunk_size: 0,
			sound_chunk_size: 0,
			form_size: 0,
			written_chunks_size: 0,
		}
	}

	fn write_u16be(&mut self, v: u16) -> Result<(), AiffError> {
		self.stream.write_all(&v.to_be_bytes())?;
		Ok(())
	}

	fn write_u32be(&mut self, v: u32) -> Result<(), AiffError> {
		self.stream.write_all(&v.to_be_bytes())?;
		Ok(())
	}

	fn write_i16be(&mut self, v: i16) -> Result<(), AiffError> {
		self.stream.write_all(&v.to_be_bytes())?;
		Ok(())
	}

	/// AIFF marker names are pascal strings padded to even length.
	fn write_pascal_string(&mut self, s: &str) -> Result<(), AiffError> {
		let len = s.len().min(0xFF);
		self.stream.write_all(&[len as u8])?;
		self.stream.write_all(&s.as_bytes()[..len])?;
		if (len + 1) & 1 != 0 {
			self.stream.write_all(&[0])?;
		}
		Ok(())
	}

	fn write_form_header(&mut self) -> Result<(), AiffError> {
		self.stream.write_all(ChunkKind::Form.fourcc())?;
		self.write_u32be(self.form_size)?;
		self.stream.write_all(b"AIFF")?;
		self.state = WriterState::Chunk {
			kind: ChunkKind::Form,
			size: 4,
		};
		Ok(())
	}

	/// Folds the open chunk into the totals, patching the deferred `SSND`
	/// size and emitting the even-byte pad where required. The final pad of
	/// the file is excluded from the FORM size.
	fn flush(&mut self, at_end: bool) -> Result<(), AiffError> {
		if self.state == WriterState::Empty {
			self.write_form_header()?;
		}
		let WriterState::Chunk { kind, size } = self.state else {
			return Ok(());
		};
		self.written |= kind.bit();

		if self.form_size == 0 {
			if kind != ChunkKind::Form {
				self.written_chunks_size += IFF_CHUNK_HEAD_SIZE as u64;
			}
			self.written_chunks_size += size;

			// The SSND size could not be known up front; patch it now
			if kind == ChunkKind::SoundData {
				let sound_chunk_size = size as u32;
				self.stream
					.seek(SeekFrom::Start(self.sound_data_offset + 4))?;
				self.write_u32be(sound_chunk_size)?;
				self.stream.seek(SeekFrom::End(0))?;
				self.sound_chunk_size = sound_chunk_size;
			}
		}

		if size & 1 != 0 {
			self.stream.write_all(&[0])?;
			if self.form_size == 0 && !at_end {
				self.written_chunks_size += 1;
			}
		}

		self.state = WriterState::Flushed;
		Ok(())
	}

	fn check_unwritten(&self, kind: ChunkKind) -> Result<(), AiffError> {
		if self.written & kind.bit() != 0 {
			return Err(AiffError::ChunkAlreadyWritten(kind));
		}
		Ok(())
	}

	/// Computes the final FORM size before any byte is written, so the whole
	/// file can be emitted without seeking.
	///
	/// `chunks` lists every chunk kind that will be written and `last` names
	/// the one written last (whose trailing pad falls outside the FORM
	/// size). `frame_size` is the byte length of one sample frame across
	/// all channels.
	pub fn precalculate_form_size(
		&mut self,
		chunks: &[ChunkKind],
		last: ChunkKind,
		markers: &[Marker],
		frame_size: u32,
		frame_count: u64,
	) -> Result<(), AiffError> {
		if self.state != WriterState::Empty || self.written != 0 {
			return Err(AiffError::PrecalcAfterWrite);
		}

		let mut form_size = 4u64;
		if chunks.contains(&ChunkKind::Common) {
			form_size += (IFF_CHUNK_HEAD_SIZE + COMMON_SIZE) as u64;
		}
		if chunks.contains(&ChunkKind::SoundData) {
			let data_length = frame_size as u64 * frame_count;
			let sound_chunk_size = SOUND_DATA_HEAD_SIZE as u64 + data_length;
			if sound_chunk_size > u32::MAX as u64 {
				return Err(AiffError::FormTooLarge(sound_chunk_size));
			}
			let sound_chunk_size = sound_chunk_size as u32;
			form_size += IFF_CHUNK_HEAD_SIZE as u64
				+ if last == ChunkKind::SoundData {
					sound_chunk_size
				} else {
					iff_real_size(sound_chunk_size)
				} as u64;
			self.sound_chunk_size = sound_chunk_size;
		}
		if chunks.contains(&ChunkKind::Markers) {
			let marker_chunk_size = marker_chunk_size(markers);
			form_size += (IFF_CHUNK_HEAD_SIZE + marker_chunk_size) as u64;
			self.marker_chunk_size = marker_chunk_size;
		}
		if chunks.contains(&ChunkKind::Instrument) {
			form_size += (IFF_CHUNK_HEAD_SIZE + INSTRUMENT_SIZE) as u64;
		}

		if form_size > u32::MAX as u64 {
			return Err(AiffError::FormTooLarge(form_size));
		}
		self.form_size = form_size as u32;
		Ok(())
	}

	/// Writes the `COMM` chunk.
	pub fn write_common(
		&mut self,
		channels: i16,
		frames: u32,
		bit_depth: i16,
		rate: u32,
	) -> Result<(), AiffError> {
		self.check_unwritten(ChunkKind::Common)?;
		self.flush(false)?;

		self.stream.write_all(ChunkKind::Common.fourcc())?;
		self.write_u32be(COMMON_SIZE)?;
		self.write_i16be(channels)?;
		self.write_u32be(frames)?;
		self.write_i16be(bit_depth)?;
		self.stream
			.write_all(&Extended::from_u32(rate).to_be_bytes())?;

		self.state = WriterState::Chunk {
			kind: ChunkKind::Common,
			size: COMMON_SIZE as u64,
		};
		Ok(())
	}

	/// Appends interleaved big-endian sample frames to the `SSND` chunk.
	///
	/// The chunk header is emitted on the first call; further calls extend
	/// the same chunk as long as no other chunk was written in between.
	pub fn write_sound_frames(&mut self, frames: &[u8]) -> Result<(), AiffError> {
		let size = match self.state {
			WriterState::Chunk {
				kind: ChunkKind::SoundData,
				size,
			} => size,
			_ => {
				self.check_unwritten(ChunkKind::SoundData)?;
				self.flush(false)?;

				if self.sound_chunk_size == 0 {
					self.sound_data_offset = self.stream.stream_position()?;
				}
				self.stream.write_all(ChunkKind::SoundData.fourcc())?;
				self.write_u32be(self.sound_chunk_size)?;
				self.write_u32be(0)?; // offset
				self.write_u32be(0)?; // block size
				SOUND_DATA_HEAD_SIZE as u64
			}
		};

		self.stream.write_all(frames)?;
		self.state = WriterState::Chunk {
			kind: ChunkKind::SoundData,
			size: size + frames.len() as u64,
		};
		Ok(())
	}

	/// Writes the `MARK` chunk.
	pub fn write_markers(&mut self, markers: &[Marker]) -> Result<(), AiffError> {
		self.check_unwritten(ChunkKind::Markers)?;
		self.flush(false)?;

		if self.marker_chunk_size == 0 {
			self.marker_chunk_size = marker_chunk_size(markers);
		}

		self.stream.write_all(ChunkKind::Markers.fourcc())?;
		self.write_u32be(self.marker_chunk_size)?;
		self.write_u16be(markers.len() as u16)?;
		for marker in markers {
			self.write_i16be(marker.id)?;
			self.write_u32be(marker.position)?;
			self.write_pascal_string(&marker.name)?;
		}

		self.state = WriterState::Chunk {
			kind: ChunkKind::Markers,
			size: self.marker_chunk_size as u64,
		};
		Ok(())
	}

	/// Writes the `INST` chunk.
	pub fn write_instrument(&mut self, instrument: &Instrument) -> Result<(), AiffError> {
		self.check_unwritten(ChunkKind::Instrument)?;
		self.flush(false)?;

		self.stream.write_all(ChunkKind::Instrument.fourcc())?;
		self.write_u32be(INSTRUMENT_SIZE)?;
		self.stream.write_all(&[
			instrument.base_note as u8,
			instrument.detune as u8,
			instrument.low_note as u8,
			instrument.high_note as u8,
			instrument.low_velocity as u8,
			instrument.high_velocity as u8,
		])?;
		self.write_i16be(instrument.gain)?;
		for l in [&instrument.sustain_loop, &instrument.release_loop] {
			self.write_i16be(l.play_mode as i16)?;
			self.write_i16be(l.begin)?;
			self.write_i16be(l.end)?;
		}

		self.state = WriterState::Chunk {
			kind: ChunkKind::Instrument,
			size: INSTRUMENT_SIZE as u64,
		};
		Ok(())
	}

	/// Flushes the last chunk, patches the FORM size if it was not
	/// precomputed, and returns the underlying sink.
	///
	/// If this fails the output is incomplete and must be discarded.
	pub fn close(mut self) -> Result<W, AiffError> {
		self.flush(true)?;

		if self.form_size == 0 {
			if self.written_chunks_size > u32::MAX as u64 {
				return Err(AiffError::FormTooLarge(self.written_chunks_size));
			}
			self.stream.seek(SeekFrom::Start(4))?;
			self.write_u32be(self.written_chunks_size as u32)?;
		}
		Ok(self.stream)
	}
}

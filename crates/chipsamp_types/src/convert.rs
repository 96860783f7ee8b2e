//! WAVE to AIFF conversion.
//!
//! Both containers carry the same PCM payload in different clothes: WAVE
//! stores little-endian samples (unsigned at 8 bits) with inclusive
//! sampler loop points, AIFF stores big-endian signed samples with
//! markers that fall between frames. The converter rewrites the payload
//! in bounded blocks and translates up to two sampler loops into AIFF
//! instrument loops.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::file::aiff::{AiffWriter, ChunkKind, Instrument, Loop, Marker, PlayMode};
use crate::file::wave::{self, SamplerLoop, SamplerLoopType};
use crate::file::{ConvertError, WaveError};

/// Sample payload is rewritten in blocks of this many bytes
const BLOCK_SIZE: usize = 16 * 1024;

fn play_mode(loop_type: SamplerLoopType) -> PlayMode {
	match loop_type {
		// AIFF has no alternating mode; the closest is a plain forward loop
		SamplerLoopType::Reverse => PlayMode::Reverse,
		_ => PlayMode::Forward,
	}
}

/// Translates WAVE sampler loops into an AIFF instrument and its markers.
///
/// Follows the common tracker interpretation of the `smpl` chunk: a single
/// loop is the release loop, played after the key is let go; with two
/// loops the first is the sustain loop and the second the release loop. A
/// degenerate second loop (empty or inverted range) is dropped, leaving
/// sustain only.
///
/// WAVE loop ends name the last frame *inside* the loop while AIFF marker
/// positions fall between frames, so every end position becomes
/// `min(end + 1, num_frames)`. Marker ids count up from 1, in the order
/// the markers are emitted.
pub fn derive_loop_markers(loops: &[SamplerLoop], num_frames: u32) -> (Instrument, Vec<Marker>) {
	let mut instrument = Instrument::default();
	let mut markers = Vec::new();

	let mut emit = |l: &SamplerLoop, begin_name: &str, end_name: &str| {
		let begin_id = markers.len() as i16 + 1;
		markers.push(Marker::new(begin_id, l.start, begin_name));
		markers.push(Marker::new(
			begin_id + 1,
			l.end.saturating_add(1).min(num_frames),
			end_name,
		));
		Loop {
			play_mode: play_mode(l.loop_type),
			begin: begin_id,
			end: begin_id + 1,
		}
	};

	match loops {
		[] => {}
		[release] => {
			instrument.release_loop = emit(release, "beg loop", "end loop");
		}
		[sustain, release, ..] => {
			instrument.sustain_loop = emit(sustain, "beg sus", "end sus");
			if release.end != 0 && release.start < release.end {
				instrument.release_loop = emit(release, "beg loop", "end loop");
			}
		}
	}
	(instrument, markers)
}

/// 8-bit WAVE samples are unsigned and have no byte order; wider samples
/// are signed already and only need the endianness swap.
fn rewrite_block(block: &mut [u8], depth: usize) {
	if depth == 1 {
		for b in block.iter_mut() {
			*b ^= 0x80;
		}
	} else {
		for unit in block.chunks_exact_mut(depth) {
			unit.reverse();
		}
	}
}

/// Converts a PCM WAVE file into an AIFF file.
///
/// The FORM size is precomputed from the harvested WAVE info, so the
/// output never needs a seek-back; the payload streams through a fixed
/// block buffer. Sampler loops, when present, become `MARK` and `INST`
/// chunks via [`derive_loop_markers`].
pub fn wave_to_aiff<R, W>(reader: &mut R, out: W) -> Result<W, ConvertError>
where
	R: Read + Seek,
	W: Write + Seek,
{
	let info = wave::read_info(reader)?;
	if info.format.format_tag != wave::FORMAT_PCM {
		return Err(WaveError::UnsupportedFormat(info.format.format_tag).into());
	}
	if info.format.bit_depth % 8 != 0 {
		return Err(WaveError::UnsupportedBitDepth(info.format.bit_depth).into());
	}

	let depth = (info.format.bit_depth / 8) as usize;
	let frame_size = info.format.channels as u32 * depth as u32;
	let num_frames = info.data_len / frame_size;
	log::debug!(
		"{} Hz, {} channels, {} bit, {} frames",
		info.format.sample_rate,
		info.format.channels,
		info.format.bit_depth,
		num_frames
	);

	let loops = info
		.sampler
		.as_ref()
		.map(|s| s.loops.as_slice())
		.unwrap_or_default();
	let (mut instrument, markers) = derive_loop_markers(loops, num_frames);

	// An instrument chunk is written whenever the source declared sampler
	// metadata, even if no usable loop survived derivation.
	let mut chunks = vec![ChunkKind::Common, ChunkKind::SoundData];
	if !markers.is_empty() {
		chunks.push(ChunkKind::Markers);
	}
	if info.sampler.is_some() {
		chunks.push(ChunkKind::Instrument);
	}
	let last = *chunks.last().unwrap_or(&ChunkKind::SoundData);

	let mut writer = AiffWriter::new(out);
	writer.precalculate_form_size(&chunks, last, &markers, frame_size, num_frames as u64)?;
	writer.write_common(
		info.format.channels as i16,
		num_frames,
		info.format.bit_depth as i16,
		info.format.sample_rate,
	)?;

	// Stream the payload, converting one bounded block at a time. The
	// block length stays a whole number of depth units.
	reader.seek(SeekFrom::Start(info.data_offset))?;
	let block_len = BLOCK_SIZE - BLOCK_SIZE % depth;
	let mut buf = vec![0u8; block_len];
	let mut remaining = (num_frames * frame_size) as usize;
	while remaining > 0 {
		let n = remaining.min(block_len);
		reader.read_exact(&mut buf[..n])?;
		rewrite_block(&mut buf[..n], depth);
		writer.write_sound_frames(&buf[..n])?;
		remaining -= n;
	}

	if !markers.is_empty() {
		writer.write_markers(&markers)?;
	}
	if let Some(sampler) = &info.sampler {
		instrument.base_note = sampler.chunk.midi_unity_note.min(127) as i8;
		writer.write_instrument(&instrument)?;
	}
	Ok(writer.close()?)
}

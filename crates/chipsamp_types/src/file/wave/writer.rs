//! RIFF/WAVE writer with sizes known up front.

use std::io::Write;

use super::types::{
	FORMAT_CHUNK_SIZE, FORMAT_PCM, SAMPLER_CHUNK_HEAD_SIZE, SAMPLER_LOOP_SIZE, SamplerInfo,
	WaveSpec,
};
use crate::file::WaveError;

fn validate(spec: &WaveSpec, data_len: u64) -> Result<u32, WaveError> {
	if data_len == 0 || data_len >= u32::MAX as u64 {
		return Err(WaveError::InvalidDataLength(data_len));
	}
	if spec.format != FORMAT_PCM {
		return Err(WaveError::UnsupportedFormat(spec.format));
	}
	if spec.channels == 0 || spec.channels >= i16::MAX as u16 {
		return Err(WaveError::UnsupportedChannels(spec.channels));
	}
	if spec.byte_depth == 0 || spec.byte_depth > 4 {
		return Err(WaveError::UnsupportedBitDepth(spec.byte_depth * 8));
	}
	// block_align is a u16 field; the frame size must fit it
	if spec.channels as u32 * spec.byte_depth as u32 > u16::MAX as u32 {
		return Err(WaveError::UnsupportedChannels(spec.channels));
	}
	Ok(data_len as u32)
}

fn sampler_chunk_size(sampler: &SamplerInfo) -> u32 {
	SAMPLER_CHUNK_HEAD_SIZE + sampler.loops.len() as u32 * SAMPLER_LOOP_SIZE
}

fn write_sampler_chunk<W: Write>(sampler: &SamplerInfo, out: &mut W) -> Result<(), WaveError> {
	out.write_all(b"smpl")?;
	out.write_all(&sampler_chunk_size(sampler).to_le_bytes())?;

	let head = &sampler.chunk;
	out.write_all(&head.manufacturer.to_le_bytes())?;
	out.write_all(&head.product.to_le_bytes())?;
	out.write_all(&head.sample_period.to_le_bytes())?;
	out.write_all(&head.midi_unity_note.to_le_bytes())?;
	out.write_all(&head.midi_pitch_frac.to_le_bytes())?;
	out.write_all(&head.smpte_format.to_le_bytes())?;
	out.write_all(&head.smpte_offset.to_le_bytes())?;
	out.write_all(&(sampler.loops.len() as u32).to_le_bytes())?;
	out.write_all(&0u32.to_le_bytes())?; // no vendor data

	for l in &sampler.loops {
		out.write_all(&l.id.to_le_bytes())?;
		let loop_type: u32 = match l.loop_type {
			super::SamplerLoopType::Forward => 0,
			super::SamplerLoopType::Bidirectional => 1,
			super::SamplerLoopType::Reverse => 2,
			super::SamplerLoopType::Unknown(code) => code,
		};
		out.write_all(&loop_type.to_le_bytes())?;
		out.write_all(&l.start.to_le_bytes())?;
		out.write_all(&l.end.to_le_bytes())?;
		out.write_all(&l.fraction.to_le_bytes())?;
		out.write_all(&l.play_count.to_le_bytes())?;
	}
	Ok(())
}

/// Writes the RIFF/WAVE headers up to and including the `data` chunk
/// header, leaving the sink positioned for the raw sample payload.
///
/// The caller streams exactly `data_len` payload bytes afterwards; the
/// declared sizes are final, so no seek-back is ever needed. An odd
/// `data_len` must be followed by one pad byte (already counted in the
/// declared RIFF size).
pub fn write_header<W: Write>(
	spec: &WaveSpec,
	sampler: Option<&SamplerInfo>,
	data_len: u64,
	out: &mut W,
) -> Result<(), WaveError> {
	let data_len = validate(spec, data_len)?;

	let mut riff_size = 4 + (8 + FORMAT_CHUNK_SIZE) + 8 + data_len + (data_len & 1);
	if let Some(sampler) = sampler {
		riff_size += 8 + sampler_chunk_size(sampler);
	}

	out.write_all(b"RIFF")?;
	out.write_all(&riff_size.to_le_bytes())?;
	out.write_all(b"WAVE")?;

	out.write_all(b"fmt ")?;
	out.write_all(&FORMAT_CHUNK_SIZE.to_le_bytes())?;
	out.write_all(&spec.format.to_le_bytes())?;
	out.write_all(&spec.channels.to_le_bytes())?;
	out.write_all(&spec.rate.to_le_bytes())?;
	let frame_size = spec.channels as u32 * spec.byte_depth as u32;
	// byte rate is advisory; saturate rather than wrap for extreme rates
	let byte_rate = spec.rate.saturating_mul(frame_size);
	out.write_all(&byte_rate.to_le_bytes())?;
	out.write_all(&(frame_size as u16).to_le_bytes())?;
	out.write_all(&(spec.byte_depth * 8).to_le_bytes())?;

	if let Some(sampler) = sampler {
		write_sampler_chunk(sampler, out)?;
	}

	out.write_all(b"data")?;
	out.write_all(&data_len.to_le_bytes())?;
	Ok(())
}

/// Writes a complete WAVE file from interleaved little-endian sample data.
pub fn write<W: Write>(spec: &WaveSpec, data: &[u8], out: &mut W) -> Result<(), WaveError> {
	write_header(spec, None, data.len() as u64, out)?;
	out.write_all(data)?;
	if data.len() & 1 != 0 {
		out.write_all(&[0])?;
	}
	Ok(())
}

/// Writes a complete WAVE file from per-channel sample planes, interleaving
/// one sample frame at a time.
///
/// Every plane must hold the same number of bytes; `planes.len()` must
/// match `spec.channels`.
pub fn write_planar<W: Write>(
	spec: &WaveSpec,
	planes: &[&[u8]],
	out: &mut W,
) -> Result<(), WaveError> {
	let plane_len = planes.first().map_or(0, |p| p.len());
	if planes.len() != spec.channels as usize || planes.iter().any(|p| p.len() != plane_len) {
		return Err(WaveError::UnsupportedChannels(planes.len() as u16));
	}
	let data_len = plane_len as u64 * spec.channels as u64;
	write_header(spec, None, data_len, out)?;

	let depth = spec.byte_depth as usize;
	for i in 0..plane_len / depth {
		for plane in planes {
			out.write_all(&plane[i * depth..(i + 1) * depth])?;
		}
	}
	if data_len & 1 != 0 {
		out.write_all(&[0])?;
	}
	Ok(())
}

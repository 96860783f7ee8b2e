//! Linear RIFF/WAVE chunk walker.

use std::io::{Read, Seek, SeekFrom};

use super::WaveInfo;
use super::types::{
	FORMAT_CHUNK_SIZE, FormatChunk, SAMPLER_CHUNK_HEAD_SIZE, SAMPLER_LOOP_SIZE, SamplerChunk,
	SamplerInfo, SamplerLoop,
};
use crate::file::WaveError;

fn read_u16le<R: Read>(reader: &mut R) -> std::io::Result<u16> {
	let mut buf = [0u8; 2];
	reader.read_exact(&mut buf)?;
	Ok(u16::from_le_bytes(buf))
}

fn read_u32le<R: Read>(reader: &mut R) -> std::io::Result<u32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(u32::from_le_bytes(buf))
}

fn read_i32le<R: Read>(reader: &mut R) -> std::io::Result<i32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(i32::from_le_bytes(buf))
}

fn read_format_chunk<R: Read>(reader: &mut R) -> Result<FormatChunk, WaveError> {
	Ok(FormatChunk {
		format_tag: read_u16le(reader)?,
		channels: read_u16le(reader)?,
		sample_rate: read_u32le(reader)?,
		byte_rate: read_u32le(reader)?,
		block_align: read_u16le(reader)?,
		bit_depth: read_u16le(reader)?,
	})
}

fn read_sampler_chunk<R: Read + Seek>(
	reader: &mut R,
	chunk_size: u32,
) -> Result<SamplerInfo, WaveError> {
	if chunk_size < SAMPLER_CHUNK_HEAD_SIZE {
		return Err(WaveError::MalformedSamplerChunk {
			size: chunk_size,
			loops: 0,
		});
	}

	let chunk = SamplerChunk {
		manufacturer: read_u32le(reader)?,
		product: read_u32le(reader)?,
		sample_period: read_i32le(reader)?,
		midi_unity_note: read_i32le(reader)?,
		midi_pitch_frac: read_i32le(reader)?,
		smpte_format: read_i32le(reader)?,
		smpte_offset: read_u32le(reader)?,
		loop_count: read_u32le(reader)?,
		vendor_data: read_u32le(reader)?,
	};

	// Widen before multiplying: a hostile loop count must not wrap the
	// size check
	let loops_inclusive =
		SAMPLER_CHUNK_HEAD_SIZE as u64 + chunk.loop_count as u64 * SAMPLER_LOOP_SIZE as u64;
	if (chunk_size as u64) < loops_inclusive {
		return Err(WaveError::MalformedSamplerChunk {
			size: chunk_size,
			loops: chunk.loop_count,
		});
	}
	let loops_inclusive = loops_inclusive as u32;

	// Conversion only ever uses the first two loops
	let mut loops = Vec::new();
	for i in 0..chunk.loop_count {
		let l = SamplerLoop {
			id: read_u32le(reader)?,
			loop_type: read_u32le(reader)?.into(),
			start: read_u32le(reader)?,
			end: read_u32le(reader)?,
			fraction: read_u32le(reader)?,
			play_count: read_u32le(reader)?,
		};
		if i < 2 {
			loops.push(l);
		}
	}

	// Some applications store garbage in the vendor data size field; only
	// honor it when the chunk actually extends past the loops.
	if chunk_size != loops_inclusive && chunk.vendor_data != 0 {
		if chunk.vendor_data != loops_inclusive + chunk_size {
			return Err(WaveError::MalformedSamplerChunk {
				size: chunk_size,
				loops: chunk.loop_count,
			});
		}
		reader.seek(SeekFrom::Current(chunk.vendor_data as i64))?;
	}

	Ok(SamplerInfo { chunk, loops })
}

/// Walks the chunk list of a WAVE file, collecting the format description,
/// the sample payload location and up to two sampler loops.
///
/// The payload itself is not read; decoding or conversion seeks back to
/// `data_offset` afterwards. Unknown chunks are skipped, honoring the
/// even-byte chunk padding rule.
pub fn read_info<R: Read + Seek>(reader: &mut R) -> Result<WaveInfo, WaveError> {
	let mut magic = [0u8; 4];
	reader.read_exact(&mut magic)?;
	if &magic != b"RIFF" {
		return Err(WaveError::InvalidMagic(magic));
	}
	let riff_size = read_u32le(reader)?;
	if riff_size < FORMAT_CHUNK_SIZE {
		return Err(WaveError::DeclaredSizeTooSmall {
			declared: riff_size,
			min: FORMAT_CHUNK_SIZE,
		});
	}
	reader.read_exact(&mut magic)?;
	if &magic != b"WAVE" {
		return Err(WaveError::NotWave(magic));
	}

	let mut format = None;
	let mut sampler = None;
	let mut data = None;

	let mut bytes = 4u64;
	while bytes < riff_size as u64 {
		let mut tag = [0u8; 4];
		if reader.read_exact(&mut tag).is_err() {
			break; // EOF before the declared size, take what we have
		}
		let size = read_u32le(reader)?;

		match &tag {
			b"fmt " => {
				if size != FORMAT_CHUNK_SIZE {
					return Err(WaveError::UnsupportedFormatChunk(size));
				}
				format = Some(read_format_chunk(reader)?);
			}
			b"smpl" => {
				sampler = Some(read_sampler_chunk(reader, size)?);
			}
			b"data" => {
				let offset = reader.stream_position()?;
				data = Some((offset, size));
				reader.seek(SeekFrom::Current(size as i64))?;
			}
			_ => {
				reader.seek(SeekFrom::Current(size as i64))?;
			}
		}

		bytes += 8 + size as u64;
		if size & 1 != 0 {
			reader.seek(SeekFrom::Current(1))?;
			bytes += 1;
		}
	}

	let format = format.ok_or(WaveError::MissingChunk("fmt "))?;
	let (data_offset, data_len) = data.ok_or(WaveError::MissingChunk("data"))?;

	if format.channels == 0 || format.channels > i16::MAX as u16 {
		return Err(WaveError::UnsupportedChannels(format.channels));
	}
	if format.bit_depth == 0 || format.bit_depth > 32 {
		return Err(WaveError::UnsupportedBitDepth(format.bit_depth));
	}

	Ok(WaveInfo {
		format,
		data_offset,
		data_len,
		sampler,
	})
}

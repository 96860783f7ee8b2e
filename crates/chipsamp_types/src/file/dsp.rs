//! GameCube `.dsp` sample file parsing.
//!
//! A `.dsp` file is a 96-byte big-endian header followed by the raw
//! DSP-ADPCM byte stream. The header carries the decoded length, the
//! predictor coefficient table and the decoder state at both the stream
//! start and the loop point. Stereo material ships as two mono files, one
//! per channel.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::codec::dsp::{self, DspContext};
use crate::file::DspError;

/// Size of the on-disk header in bytes
pub const HEADER_SIZE: usize = 96;

fn read_u16be<R: Read>(reader: &mut R) -> std::io::Result<u16> {
	let mut buf = [0u8; 2];
	reader.read_exact(&mut buf)?;
	Ok(u16::from_be_bytes(buf))
}

fn read_i16be<R: Read>(reader: &mut R) -> std::io::Result<i16> {
	let mut buf = [0u8; 2];
	reader.read_exact(&mut buf)?;
	Ok(i16::from_be_bytes(buf))
}

fn read_u32be<R: Read>(reader: &mut R) -> std::io::Result<u32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(u32::from_be_bytes(buf))
}

/// One parsed `.dsp` file: the full header plus the ADPCM payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DspFile {
	/// Decoded length in samples
	pub sample_count: u32,
	/// Encoded length in nibbles, header frame bytes included
	pub nibble_count: u32,
	/// Playback rate in Hz
	pub sample_rate: u32,
	/// 1 when the sample loops
	pub loop_flag: u16,
	/// Always 0 for plain DSP-ADPCM
	pub format: u16,
	/// Loop start as a nibble address into the stream
	pub loop_start: u32,
	/// Loop end as a nibble address into the stream
	pub loop_end: u32,
	/// Initial playback nibble address
	pub current_address: u32,
	/// Predictor coefficients, 8 pairs of (c1, c2)
	pub coefs: [i16; 16],
	/// Playback gain
	pub gain: u16,
	/// Predictor/scale header byte of the first frame
	pub pred_scale: u16,
	/// Sample history n-1 at stream start
	pub yn1: i16,
	/// Sample history n-2 at stream start
	pub yn2: i16,
	/// Predictor/scale header byte at the loop point
	pub loop_pred_scale: u16,
	/// Sample history n-1 at the loop point
	pub loop_yn1: i16,
	/// Sample history n-2 at the loop point
	pub loop_yn2: i16,
	/// Channel count hint, 0 or 1 in mono files
	pub channels: u16,
	/// Interleave block size for multi-channel payloads
	pub block_size: u16,
	/// ADPCM payload
	#[serde(skip)]
	pub adpcm: Vec<u8>,
}

impl DspFile {
	/// Reads a complete `.dsp` file: the 96-byte header and every payload
	/// byte the source still holds.
	///
	/// Rejects headers with a loop flag other than 0/1 or a nonzero format
	/// field, and payloads too short for the declared sample count.
	pub fn read<R: Read>(reader: &mut R) -> Result<Self, DspError> {
		let sample_count = read_u32be(reader)?;
		let nibble_count = read_u32be(reader)?;
		let sample_rate = read_u32be(reader)?;
		let loop_flag = read_u16be(reader)?;
		let format = read_u16be(reader)?;
		if loop_flag > 1 {
			return Err(DspError::UnsupportedLoopFlag(loop_flag));
		}
		if format != 0 {
			return Err(DspError::UnsupportedFormat(format));
		}

		let loop_start = read_u32be(reader)?;
		let loop_end = read_u32be(reader)?;
		let current_address = read_u32be(reader)?;

		let mut coefs = [0i16; 16];
		for c in &mut coefs {
			*c = read_i16be(reader)?;
		}

		let gain = read_u16be(reader)?;
		let pred_scale = read_u16be(reader)?;
		let yn1 = read_i16be(reader)?;
		let yn2 = read_i16be(reader)?;
		let loop_pred_scale = read_u16be(reader)?;
		let loop_yn1 = read_i16be(reader)?;
		let loop_yn2 = read_i16be(reader)?;
		let channels = read_u16be(reader)?;
		let block_size = read_u16be(reader)?;

		// Remainder of the header is reserved padding
		let mut reserved = [0u8; 18];
		reader.read_exact(&mut reserved)?;

		let mut adpcm = Vec::new();
		reader.read_to_end(&mut adpcm)?;

		let expected = dsp::adpcm_byte_len(sample_count);
		if adpcm.len() < expected {
			return Err(DspError::InsufficientData {
				expected,
				actual: adpcm.len(),
			});
		}

		Ok(Self {
			sample_count,
			nibble_count,
			sample_rate,
			loop_flag,
			format,
			loop_start,
			loop_end,
			current_address,
			coefs,
			gain,
			pred_scale,
			yn1,
			yn2,
			loop_pred_scale,
			loop_yn1,
			loop_yn2,
			channels,
			block_size,
			adpcm,
		})
	}

	/// Whether the header declares a loop.
	pub fn is_looped(&self) -> bool {
		self.loop_flag == 1
	}

	/// Loop start as a sample index.
	pub fn loop_start_sample(&self) -> u32 {
		dsp::nibble_to_sample(self.loop_start)
	}

	/// Loop end as a sample index.
	pub fn loop_end_sample(&self) -> u32 {
		dsp::nibble_to_sample(self.loop_end)
	}

	/// Decoder context assembled from the header state block.
	pub fn context(&self) -> DspContext {
		DspContext {
			coefs: self.coefs,
			gain: self.gain,
			pred_scale: self.pred_scale,
			yn1: self.yn1,
			yn2: self.yn2,
			loop_pred_scale: self.loop_pred_scale,
			loop_yn1: self.loop_yn1,
			loop_yn2: self.loop_yn2,
		}
	}

	/// Decodes the whole payload to 16-bit PCM.
	pub fn decode(&self) -> Vec<i16> {
		dsp::decode(&self.adpcm, &self.context(), self.sample_count)
	}
}

//! YM2610 ADPCM-A decoder.
//!
//! ADPCM-A is the 4-bit sample format of the Neo Geo's six "A" channels.
//! The decoder holds a 12-bit signal accumulator and a step index into a
//! precomputed 49x16 difference table; each input byte carries two codes,
//! high nibble first.

use log::warn;

/// Number of step levels in the difference table
const STEP_LEVELS: usize = 49;

/// Internal accumulator range (11-bit signed)
const DECODE_RANGE: i32 = 1024;
const DECODE_MIN: i32 = -DECODE_RANGE;
const DECODE_MAX: i32 = DECODE_RANGE - 1;

/// Step index adjustment per 4-bit code ({-1,-1,-1,-1,2,5,7,9} x 16, mirrored)
const STEP_ADJUST: [i32; 16] = [
	-16, -16, -16, -16, 32, 80, 112, 144, -16, -16, -16, -16, 32, 80, 112, 144,
];

/// Streaming YM2610 ADPCM-A decoder.
///
/// The difference table is generated once at construction; `decode` may be
/// called repeatedly to process a sample in bounded blocks.
#[derive(Debug, Clone)]
pub struct AdpcmADecoder {
	/// Precomputed step/nibble difference table, 49 steps x 16 codes
	jedi_table: [i32; STEP_LEVELS * 16],
	signal: i32,
	delta: i32,
}

impl AdpcmADecoder {
	/// Creates a decoder with a freshly generated difference table and
	/// zeroed adaptive state.
	pub fn new() -> Self {
		let mut jedi_table = [0i32; STEP_LEVELS * 16];
		for step in 0..STEP_LEVELS {
			let stepval = (16.0 * (11.0f64 / 10.0).powi(step as i32)).floor() as i32;
			for nib in 0..16 {
				let value = stepval * ((nib as i32 & 0x07) * 2 + 1) / 8;
				jedi_table[step * 16 + nib] = if nib & 0x08 != 0 { -value } else { value };
			}
		}
		Self {
			jedi_table,
			signal: 0,
			delta: 0,
		}
	}

	/// Decodes a block of ADPCM-A bytes, yielding two 16-bit PCM samples
	/// per input byte.
	///
	/// Adaptive state persists across calls, so a long sample may be fed in
	/// chunks. A jump of more than 2500 between consecutive signal values is
	/// logged as a warning; the stream keeps decoding since the adaptive
	/// state recovers on its own.
	pub fn decode(&mut self, adpcm: &[u8]) -> Vec<i16> {
		let mut pcm = Vec::with_capacity(adpcm.len() * 2);
		for (pos, &byte) in adpcm.iter().enumerate() {
			for shift in [4u32, 0u32] {
				let code = ((byte >> shift) & 0x0F) as usize;
				let diff = self.jedi_table[(code as i32 + self.delta) as usize];
				let old_signal = self.signal;
				self.signal = (self.signal + diff).clamp(DECODE_MIN, DECODE_MAX);
				self.delta = (self.delta + STEP_ADJUST[code]).clamp(0, 48 * 16);
				if (old_signal - self.signal).abs() > 2500 {
					warn!(
						"suspicious signal evolution {:06x},{:06x} pos:{:06x} delta:{:06x} code:{:02x} dx:{:08x}",
						old_signal, self.signal, pos, self.delta, code, diff
					);
				}
				// The 11-bit signal is scaled up to full 16-bit amplitude
				pcm.push(((self.signal & 0xFFFF) * 32) as i16);
			}
		}
		pcm
	}
}

impl Default for AdpcmADecoder {
	fn default() -> Self {
		Self::new()
	}
}

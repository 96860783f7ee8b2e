//! YM2610 ADPCM-B encoder and decoder.
//!
//! ADPCM-B is the single "deltaT" channel of the YM2610 (compatible with the
//! YM2608): 4-bit codes, a 16-bit accumulator and a multiplicative step size
//! bounded to `[127, 24576]`. Encoder and decoder share the step size update
//! so a stream round-trips through hardware-compatible state.

/// Step size multiplier table, indexed by the full 4-bit code (x64)
const STEP_SIZE_TABLE: [i32; 16] = [
	57, 57, 57, 57, 77, 102, 128, 153, 57, 57, 57, 57, 77, 102, 128, 153,
];

const STEP_SIZE_MIN: i32 = 127;
const STEP_SIZE_MAX: i32 = 24576;

/// Applies the shared step size adaptation for a 4-bit code.
fn next_step_size(step_size: i32, code: u8) -> i32 {
	(step_size * STEP_SIZE_TABLE[code as usize] / 64).clamp(STEP_SIZE_MIN, STEP_SIZE_MAX)
}

/// Streaming ADPCM-B encoder (16-bit PCM in, packed 4-bit codes out).
#[derive(Debug, Clone)]
pub struct AdpcmBEncoder {
	xn: i32,
	step_size: i32,
	/// High nibble waiting for its partner before a byte can be emitted
	pending: Option<u8>,
}

impl AdpcmBEncoder {
	/// Creates an encoder in the hardware reset state.
	pub fn new() -> Self {
		Self {
			xn: 0,
			step_size: STEP_SIZE_MIN,
			pending: None,
		}
	}

	/// Encodes a block of PCM samples, two samples per output byte with the
	/// first code in the high nibble.
	///
	/// An odd trailing sample is held as a pending nibble and joined with
	/// the first sample of the next call; use [`finish`](Self::finish) to
	/// flush it at end of stream.
	pub fn encode(&mut self, pcm: &[i16]) -> Vec<u8> {
		let mut adpcm = Vec::with_capacity(pcm.len().div_ceil(2));
		for &sample in pcm {
			let dn = sample as i32 - self.xn;

			let code = (((dn.unsigned_abs() as i64) << 16) / ((self.step_size as i64) << 14))
				.min(7) as u8;

			let diff = (code as i32 * 2 + 1) * self.step_size / 8;
			let code = if dn < 0 {
				self.xn -= diff;
				code | 0x8
			} else {
				self.xn += diff;
				code
			};

			self.step_size = next_step_size(self.step_size, code);

			match self.pending.take() {
				None => self.pending = Some(code << 4),
				Some(high) => adpcm.push(high | code),
			}
		}
		adpcm
	}

	/// Flushes a pending half-byte, if any, padding the low nibble with zero.
	pub fn finish(&mut self) -> Option<u8> {
		self.pending.take()
	}
}

impl Default for AdpcmBEncoder {
	fn default() -> Self {
		Self::new()
	}
}

/// Streaming ADPCM-B decoder (packed 4-bit codes in, 16-bit PCM out).
#[derive(Debug, Clone)]
pub struct AdpcmBDecoder {
	xn: i32,
	step_size: i32,
}

impl AdpcmBDecoder {
	/// Creates a decoder in the hardware reset state.
	pub fn new() -> Self {
		Self {
			xn: 0,
			step_size: STEP_SIZE_MIN,
		}
	}

	/// Decodes a block of ADPCM-B bytes, yielding two PCM samples per input
	/// byte (high nibble first). State persists across calls.
	pub fn decode(&mut self, adpcm: &[u8]) -> Vec<i16> {
		let mut pcm = Vec::with_capacity(adpcm.len() * 2);
		for &byte in adpcm {
			for shift in [4u32, 0u32] {
				let code = (byte >> shift) & 0xF;

				let diff = ((code as i32 & 7) * 2 + 1) * self.step_size / 8;
				if code & 8 != 0 {
					self.xn -= diff;
				} else {
					self.xn += diff;
				}
				self.xn = self.xn.clamp(i16::MIN as i32, i16::MAX as i32);

				self.step_size = next_step_size(self.step_size, code);

				pcm.push(self.xn as i16);
			}
		}
		pcm
	}
}

impl Default for AdpcmBDecoder {
	fn default() -> Self {
		Self::new()
	}
}

/// Derives the playback sample rate from a YM2610 deltaT-N register value.
///
/// `rate = delta_n * (clock / 72) / 65536`, rounded to the nearest Hz. The
/// chip clock defaults to 4 MHz in most Neo Geo configurations.
pub fn delta_t_to_sample_rate(delta_n: u16, clock: u32) -> u32 {
	(delta_n as f64 * (clock as f64 / 72.0) / 65536.0 + 0.5) as u32
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sine_pcm(len: usize, amplitude: f64, period: f64) -> Vec<i16> {
		(0..len)
			.map(|i| ((i as f64 / period * std::f64::consts::TAU).sin() * amplitude) as i16)
			.collect()
	}

	fn round_trip(pcm: &[i16]) -> Vec<i16> {
		let mut encoder = AdpcmBEncoder::new();
		let mut adpcm = encoder.encode(pcm);
		adpcm.extend(encoder.finish());
		AdpcmBDecoder::new().decode(&adpcm)
	}

	#[test]
	fn round_trip_error_is_bounded() {
		let pcm = sine_pcm(2048, 12000.0, 128.0);
		let decoded = round_trip(&pcm);
		assert_eq!(decoded.len(), pcm.len());

		// Lossy codec: not bit exact, but the adaptive step keeps the
		// error within the largest step the encoder can take.
		let max_err = pcm
			.iter()
			.zip(&decoded)
			.map(|(&a, &b)| (a as i32 - b as i32).abs())
			.max()
			.unwrap();
		assert!(max_err <= STEP_SIZE_MAX * 15 / 8, "max error {max_err}");
		assert!(max_err > 0);
	}

	#[test]
	fn round_trip_error_grows_with_amplitude_not_time() {
		let quiet = sine_pcm(4096, 1000.0, 64.0);
		let loud = sine_pcm(4096, 30000.0, 64.0);

		let err = |pcm: &[i16]| -> i64 {
			round_trip(pcm)
				.iter()
				.zip(pcm)
				.map(|(&a, &b)| (a as i64 - b as i64).abs())
				.sum()
		};
		let quiet_err = err(&quiet);
		let loud_err = err(&loud);
		assert!(loud_err > quiet_err);

		// No divergence over time: the last quarter tracks as well as the
		// second one (the first adapts from reset).
		let decoded = round_trip(&loud);
		let quarter_err = |range: std::ops::Range<usize>| -> i64 {
			range
				.map(|i| (decoded[i] as i64 - loud[i] as i64).abs())
				.sum()
		};
		let early = quarter_err(1024..2048);
		let late = quarter_err(3072..4096);
		assert!(late < early * 2, "early {early} late {late}");
	}

	#[test]
	fn decode_block_split_matches_one_shot() {
		let pcm = sine_pcm(512, 8000.0, 50.0);
		let mut encoder = AdpcmBEncoder::new();
		let adpcm = encoder.encode(&pcm);

		let whole = AdpcmBDecoder::new().decode(&adpcm);
		let mut decoder = AdpcmBDecoder::new();
		let mut split = Vec::new();
		for chunk in adpcm.chunks(13) {
			split.extend(decoder.decode(chunk));
		}
		assert_eq!(whole, split);
	}

	#[test]
	fn encode_holds_pending_nibble_across_calls() {
		let pcm = sine_pcm(101, 5000.0, 25.0);

		let mut one = AdpcmBEncoder::new();
		let mut whole = one.encode(&pcm);
		whole.extend(one.finish());

		let mut two = AdpcmBEncoder::new();
		let mut split = Vec::new();
		for chunk in pcm.chunks(7) {
			split.extend(two.encode(chunk));
		}
		split.extend(two.finish());

		assert_eq!(whole, split);
		assert_eq!(whole.len(), pcm.len().div_ceil(2));
	}

	#[test]
	fn silence_encodes_to_silence() {
		let pcm = vec![0i16; 64];
		let decoded = round_trip(&pcm);
		// Reset state starts at zero, codes stay minimal
		assert!(decoded.iter().all(|&s| s.abs() <= STEP_SIZE_MIN as i16));
	}

	#[test]
	fn delta_t_register_rates() {
		// Full rate at the default 4 MHz clock
		assert_eq!(delta_t_to_sample_rate(0xFFFF, 4_000_000), 55555);
		// Half rate
		assert_eq!(delta_t_to_sample_rate(0x8000, 4_000_000), 27778);
		assert_eq!(delta_t_to_sample_rate(0, 4_000_000), 0);
	}
}

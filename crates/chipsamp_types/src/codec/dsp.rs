//! GameCube DSP-ADPCM decoder.
//!
//! DSP-ADPCM packs samples into fixed 8-byte frames: one header byte whose
//! high nibble selects one of eight predictor coefficient pairs and whose
//! low nibble is a logarithmic scale, followed by fourteen 4-bit sample
//! codes (high nibble of each byte first). Prediction history carries
//! across frames through the last two decoded samples.

/// PCM samples carried by one full ADPCM frame
pub const SAMPLES_PER_FRAME: u32 = 14;

/// Encoded size of one full frame in bytes (1 header + 7 packed)
pub const BYTES_PER_FRAME: u32 = 8;

/// Decoder context for one DSP-ADPCM stream.
///
/// Mirrors the channel state block of a GameCube `.dsp` file: the predictor
/// coefficient table is immutable per stream, the history pair feeds the
/// next decode call, and the `loop_*` triple restarts decoding from the
/// loop point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DspContext {
	/// Predictor coefficients, 8 pairs of (c1, c2)
	pub coefs: [i16; 16],
	/// Playback gain (unused by the decoder, carried for completeness)
	pub gain: u16,
	/// Predictor/scale header byte at stream start
	pub pred_scale: u16,
	/// Sample history n-1
	pub yn1: i16,
	/// Sample history n-2
	pub yn2: i16,
	/// Predictor/scale header byte at the loop point
	pub loop_pred_scale: u16,
	/// Sample history n-1 at the loop point
	pub loop_yn1: i16,
	/// Sample history n-2 at the loop point
	pub loop_yn2: i16,
}

/// Bytes of ADPCM data needed to hold `samples` decoded samples.
pub fn adpcm_byte_len(samples: u32) -> usize {
	(samples.div_ceil(SAMPLES_PER_FRAME) * BYTES_PER_FRAME) as usize
}

/// Converts a nibble address into a sample index.
///
/// Stream addresses (loop points, current address) count 4-bit nibbles
/// including the two header nibbles that open every 16-nibble frame and
/// carry no samples.
pub fn nibble_to_sample(nibble: u32) -> u32 {
	let frames = nibble / 16;
	let rem = (nibble % 16).saturating_sub(2);
	frames * SAMPLES_PER_FRAME + rem
}

fn high_nibble(value: u8) -> u8 {
	value >> 4 & 0xF
}

fn low_nibble(value: u8) -> u8 {
	value & 0xF
}

fn clamp16(value: i32) -> i16 {
	value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Runs the prediction recursion over one frame, optionally collecting the
/// decoded samples. Returns the updated history pair.
fn predict_frame(
	frame: &[u8],
	coef1: i32,
	coef2: i32,
	scale: i32,
	count: u32,
	mut hist: (i16, i16),
	out: Option<&mut Vec<i16>>,
) -> (i16, i16) {
	let mut collected = out;
	for s in 0..count {
		let code = if s & 1 != 0 {
			low_nibble(frame[(s / 2) as usize])
		} else {
			high_nibble(frame[(s / 2) as usize])
		};
		let raw = if code >= 8 { code as i32 - 16 } else { code as i32 };
		let predicted = (scale * raw) << 11;
		let sample =
			clamp16((predicted + 1024 + coef1 * hist.0 as i32 + coef2 * hist.1 as i32) >> 11);

		hist = (sample, hist.0);
		if let Some(out) = collected.as_deref_mut() {
			out.push(sample);
		}
	}
	hist
}

/// Decodes `sample_count` samples from a DSP-ADPCM byte stream.
///
/// `ctx.yn1`/`ctx.yn2` seed the prediction history and are not modified;
/// decoding always starts at a frame boundary.
///
/// # Panics
///
/// Panics if `adpcm` holds fewer than [`adpcm_byte_len`]`(sample_count)`
/// bytes.
pub fn decode(adpcm: &[u8], ctx: &DspContext, sample_count: u32) -> Vec<i16> {
	let mut pcm = Vec::with_capacity(sample_count as usize);
	let mut hist = (ctx.yn1, ctx.yn2);
	let mut remaining = sample_count;
	let mut src = adpcm;

	while remaining > 0 {
		let header = src[0];
		let coef1 = ctx.coefs[high_nibble(header) as usize * 2] as i32;
		let coef2 = ctx.coefs[high_nibble(header) as usize * 2 + 1] as i32;
		let scale = 1i32 << low_nibble(header);

		let count = remaining.min(SAMPLES_PER_FRAME);
		hist = predict_frame(&src[1..], coef1, coef2, scale, count, hist, Some(&mut pcm));

		remaining -= count;
		src = &src[BYTES_PER_FRAME as usize..];
	}
	pcm
}

/// Replays the prediction recursion over the first `sample_count` samples
/// without emitting them, recording the `(pred_scale, yn1, yn2)` context a
/// player needs to resume decoding at the loop restart point.
///
/// # Panics
///
/// Panics if `adpcm` holds fewer than [`adpcm_byte_len`]`(sample_count)`
/// bytes.
pub fn loop_context(adpcm: &[u8], ctx: &mut DspContext, sample_count: u32) {
	let mut hist = (ctx.yn1, ctx.yn2);
	let mut ps = 0u8;
	let mut remaining = sample_count;
	let mut src = adpcm;

	while remaining > 0 {
		let header = src[0];
		ps = header;
		let coef1 = ctx.coefs[high_nibble(header) as usize * 2] as i32;
		let coef2 = ctx.coefs[high_nibble(header) as usize * 2 + 1] as i32;
		let scale = 1i32 << low_nibble(header);

		let count = remaining.min(SAMPLES_PER_FRAME);
		hist = predict_frame(&src[1..], coef1, coef2, scale, count, hist, None);

		remaining -= count;
		src = &src[BYTES_PER_FRAME as usize..];
	}

	ctx.loop_pred_scale = ps as u16;
	ctx.loop_yn1 = hist.0;
	ctx.loop_yn2 = hist.1;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_context() -> DspContext {
		DspContext {
			coefs: [
				1024, -512, 2048, -1024, 512, 256, 3000, -1500, 100, 50, 0, 0, 4096, -2048, 64,
				-32,
			],
			..Default::default()
		}
	}

	#[test]
	fn single_frame_sample_count() {
		let ctx = test_context();
		// Predictor 0, scale 1<<1, then 14 nibble codes
		let frame = [0x01u8, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
		let pcm = decode(&frame, &ctx, SAMPLES_PER_FRAME);
		assert_eq!(pcm.len(), SAMPLES_PER_FRAME as usize);
	}

	#[test]
	fn first_samples_follow_reference_recursion() {
		let ctx = test_context();
		// Predictor 0 (coefs 1024, -512), scale 1<<0, codes 1, 0xF (-1)
		let frame = [0x00u8, 0x1F, 0, 0, 0, 0, 0, 0];
		let pcm = decode(&frame, &ctx, 2);
		// sample0 = ((1 << 11) + 1024 + 0) >> 11 = 1
		assert_eq!(pcm[0], 1);
		// sample1 = ((-1 << 11) + 1024 + 1024 * 1) >> 11 = 0
		assert_eq!(pcm[1], 0);
	}

	#[test]
	fn partial_last_frame() {
		let ctx = test_context();
		let adpcm = vec![0x02u8; adpcm_byte_len(17)];
		let pcm = decode(&adpcm, &ctx, 17);
		assert_eq!(pcm.len(), 17);
	}

	#[test]
	fn loop_context_resume_matches_one_pass() {
		let ctx = test_context();
		// Three frames of varied codes
		let adpcm: Vec<u8> = (0..24u8)
			.map(|i| if i % 8 == 0 { 0x23 } else { i.wrapping_mul(0x5D) })
			.collect();

		let loop_start = 28; // two whole frames
		let total = 42;
		let whole = decode(&adpcm, &ctx, total);

		let mut looped = ctx.clone();
		loop_context(&adpcm, &mut looped, loop_start);
		// ps is the header of the last frame the replay touched
		assert_eq!(looped.loop_pred_scale, adpcm[8] as u16);

		// Resume from the loop context and compare the continuation
		let resumed_ctx = DspContext {
			yn1: looped.loop_yn1,
			yn2: looped.loop_yn2,
			..ctx.clone()
		};
		let resumed = decode(&adpcm[16..], &resumed_ctx, total - loop_start);
		assert_eq!(&whole[loop_start as usize..], &resumed[..]);
	}

	#[test]
	fn buffer_length_helper() {
		assert_eq!(adpcm_byte_len(0), 0);
		assert_eq!(adpcm_byte_len(1), 8);
		assert_eq!(adpcm_byte_len(14), 8);
		assert_eq!(adpcm_byte_len(15), 16);
		assert_eq!(adpcm_byte_len(28), 16);
	}

	#[test]
	fn nibble_addresses_skip_frame_headers() {
		// First sample of a stream sits at nibble 2
		assert_eq!(nibble_to_sample(2), 0);
		assert_eq!(nibble_to_sample(15), 13);
		// Second frame starts over after its header pair
		assert_eq!(nibble_to_sample(16), 14);
		assert_eq!(nibble_to_sample(18), 14);
		assert_eq!(nibble_to_sample(19), 15);
	}
}

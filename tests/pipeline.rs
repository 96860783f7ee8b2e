//! End-to-end pipeline tests through the public facade.

use std::io::Cursor;

use chipsamp_rs::prelude::*;

fn sine_pcm(len: usize, amplitude: f64, period: f64) -> Vec<i16> {
	(0..len)
		.map(|i| ((i as f64 / period * std::f64::consts::TAU).sin() * amplitude) as i16)
		.collect()
}

fn le_bytes(pcm: &[i16]) -> Vec<u8> {
	pcm.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// ADPCM-B material survives the whole tool chain: encode, decode, WAV
/// container, AIFF conversion.
#[test]
fn adpcm_b_to_wav_to_aiff() {
	let pcm = sine_pcm(2000, 9000.0, 100.0);

	let mut encoder = AdpcmBEncoder::new();
	let mut adpcm = encoder.encode(&pcm);
	adpcm.extend(encoder.finish());

	let decoded = AdpcmBDecoder::new().decode(&adpcm);
	assert_eq!(decoded.len(), pcm.len());

	let spec = WaveSpec {
		format: file::wave::FORMAT_PCM,
		channels: 1,
		rate: delta_t_to_sample_rate(0x8000, 4_000_000),
		byte_depth: 2,
	};
	let mut wav = Vec::new();
	file::wave::write(&spec, &le_bytes(&decoded), &mut wav).unwrap();

	let info = file::wave::read_info(&mut Cursor::new(&wav)).unwrap();
	assert_eq!(info.format.sample_rate, 27778);
	assert_eq!(info.data_len as usize, decoded.len() * 2);

	let aiff = wave_to_aiff(&mut Cursor::new(wav), Cursor::new(Vec::new()))
		.unwrap()
		.into_inner();
	assert_eq!(&aiff[0..4], b"FORM");
	let form_size = u32::from_be_bytes(aiff[4..8].try_into().unwrap());
	assert_eq!(form_size as usize, aiff.len() - 8);
	// Payload is the decoded samples, byte-swapped to big-endian
	assert_eq!(&aiff[54..56], &decoded[0].to_be_bytes());
}

/// Sample blocks pulled out of a VGM stream decode like the raw dumps.
#[test]
fn vgm_block_decodes_like_raw_stream() {
	let payload: Vec<u8> = (0..512u32).map(|i| (i.wrapping_mul(37) >> 2) as u8).collect();
	let mut stream = vec![0x61, 0x00, 0x01]; // wait command
	stream.extend([0x67, 0x66, 0x82]);
	stream.extend(&(payload.len() as u32 + 8).to_le_bytes());
	stream.extend(&[0u8; 8]); // ROM size + offset
	stream.extend(&payload);

	let mut scanner = VgmScanner::new(Cursor::new(stream));
	let (kind, block) = scanner.next_block().unwrap().expect("one block");
	assert_eq!(kind, AdpcmKind::A);
	assert_eq!(block, payload);
	assert!(scanner.next_block().unwrap().is_none());

	let from_block = AdpcmADecoder::new().decode(&block);
	let from_raw = AdpcmADecoder::new().decode(&payload);
	assert_eq!(from_block, from_raw);
}

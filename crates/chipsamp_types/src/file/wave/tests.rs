//! Unit tests for WAVE reading and writing.

use std::io::Cursor;

use super::*;
use crate::file::WaveError;

fn pcm_spec(channels: u16, rate: u32, byte_depth: u16) -> WaveSpec {
	WaveSpec {
		format: FORMAT_PCM,
		channels,
		rate,
		byte_depth,
	}
}

/// Builds a minimal WAVE file: fmt + optional extra chunk + data.
fn build_wave(data: &[u8], extra: Option<(&[u8; 4], &[u8])>) -> Vec<u8> {
	let mut out = Vec::new();
	write(&pcm_spec(1, 22050, 2), data, &mut out).unwrap();
	if let Some((tag, payload)) = extra {
		// Splice the extra chunk in front of the data chunk
		let data_pos = 36;
		let mut chunk = Vec::new();
		chunk.extend_from_slice(&tag[..]);
		chunk.extend_from_slice(&(payload.len() as u32).to_le_bytes());
		chunk.extend_from_slice(payload);
		if payload.len() & 1 != 0 {
			chunk.push(0);
		}
		out.splice(data_pos..data_pos, chunk.iter().copied());
		let new_size = u32::from_le_bytes(out[4..8].try_into().unwrap()) + chunk.len() as u32;
		out[4..8].copy_from_slice(&new_size.to_le_bytes());
	}
	out
}

#[test]
fn writer_emits_canonical_header() {
	let mut out = Vec::new();
	write(&pcm_spec(2, 44100, 2), &[0u8; 16], &mut out).unwrap();

	assert_eq!(&out[0..4], b"RIFF");
	assert_eq!(u32::from_le_bytes(out[4..8].try_into().unwrap()), 36 + 16);
	assert_eq!(&out[8..12], b"WAVE");
	assert_eq!(&out[12..16], b"fmt ");
	assert_eq!(u32::from_le_bytes(out[16..20].try_into().unwrap()), 16);
	assert_eq!(u16::from_le_bytes(out[20..22].try_into().unwrap()), 1); // PCM
	assert_eq!(u16::from_le_bytes(out[22..24].try_into().unwrap()), 2);
	assert_eq!(u32::from_le_bytes(out[24..28].try_into().unwrap()), 44100);
	assert_eq!(
		u32::from_le_bytes(out[28..32].try_into().unwrap()),
		44100 * 4
	);
	assert_eq!(u16::from_le_bytes(out[32..34].try_into().unwrap()), 4);
	assert_eq!(u16::from_le_bytes(out[34..36].try_into().unwrap()), 16);
	assert_eq!(&out[36..40], b"data");
	assert_eq!(u32::from_le_bytes(out[40..44].try_into().unwrap()), 16);
	assert_eq!(out.len(), 60);
}

#[test]
fn writer_output_parses_with_hound() {
	let samples: Vec<i16> = (0..64).map(|i| i * 100 - 3200).collect();
	let data: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

	let mut out = Vec::new();
	write(&pcm_spec(1, 18500, 2), &data, &mut out).unwrap();

	let mut reader = hound::WavReader::new(Cursor::new(out)).unwrap();
	let spec = reader.spec();
	assert_eq!(spec.channels, 1);
	assert_eq!(spec.sample_rate, 18500);
	assert_eq!(spec.bits_per_sample, 16);
	assert_eq!(spec.sample_format, hound::SampleFormat::Int);

	let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
	assert_eq!(decoded, samples);
}

#[test]
fn writer_rejects_bad_specs() {
	let mut out = Vec::new();
	assert!(matches!(
		write(&pcm_spec(1, 8000, 2), &[], &mut out),
		Err(WaveError::InvalidDataLength(0))
	));
	assert!(matches!(
		write(&pcm_spec(0, 8000, 2), &[0, 0], &mut out),
		Err(WaveError::UnsupportedChannels(0))
	));
	assert!(matches!(
		write(&pcm_spec(1, 8000, 5), &[0, 0], &mut out),
		Err(WaveError::UnsupportedBitDepth(40))
	));
	let float_spec = WaveSpec {
		format: 0x0003,
		..pcm_spec(1, 8000, 2)
	};
	assert!(matches!(
		write(&float_spec, &[0, 0], &mut out),
		Err(WaveError::UnsupportedFormat(3))
	));
	// Frame size would not fit the u16 block_align field
	assert!(matches!(
		write(&pcm_spec(16384, 8000, 4), &[0, 0], &mut out),
		Err(WaveError::UnsupportedChannels(16384))
	));
}

#[test]
fn planar_write_interleaves_frames() {
	let left = [1u8, 0, 2, 0];
	let right = [3u8, 0, 4, 0];
	let mut out = Vec::new();
	write_planar(&pcm_spec(2, 32000, 2), &[&left[..], &right[..]], &mut out).unwrap();

	let info = read_info(&mut Cursor::new(&out)).unwrap();
	assert_eq!(info.data_len, 8);
	let payload = &out[info.data_offset as usize..info.data_offset as usize + 8];
	assert_eq!(payload, &[1, 0, 3, 0, 2, 0, 4, 0]);
}

#[test]
fn reader_round_trips_writer_output() {
	let data = vec![0x11u8; 250];
	let bytes = build_wave(&data, None);
	let info = read_info(&mut Cursor::new(bytes)).unwrap();

	assert_eq!(info.format.format_tag, FORMAT_PCM);
	assert_eq!(info.format.channels, 1);
	assert_eq!(info.format.sample_rate, 22050);
	assert_eq!(info.format.bit_depth, 16);
	assert_eq!(info.data_offset, 44);
	assert_eq!(info.data_len, 250);
	assert!(info.sampler.is_none());
}

#[test]
fn reader_skips_unknown_chunks() {
	let bytes = build_wave(&[0u8; 4], Some((b"LIST", &[7u8; 13])));
	let info = read_info(&mut Cursor::new(bytes)).unwrap();
	// Odd-size chunk is padded: data moves by 8 + 13 + 1
	assert_eq!(info.data_offset, 44 + 22);
	assert_eq!(info.data_len, 4);
}

#[test]
fn reader_collects_sampler_loops() {
	let mut smpl = Vec::new();
	for v in [0u32, 0, 45351, 60, 0, 0, 0, 2, 0] {
		smpl.extend_from_slice(&v.to_le_bytes());
	}
	for (id, ty, start, end) in [(0u32, 0u32, 100u32, 200u32), (1, 2, 200, 199)] {
		for v in [id, ty, start, end, 0, 0] {
			smpl.extend_from_slice(&v.to_le_bytes());
		}
	}

	let bytes = build_wave(&[0u8; 4], Some((b"smpl", &smpl)));
	let info = read_info(&mut Cursor::new(bytes)).unwrap();
	let sampler = info.sampler.unwrap();

	assert_eq!(sampler.chunk.loop_count, 2);
	assert_eq!(sampler.chunk.midi_unity_note, 60);
	assert_eq!(sampler.loops.len(), 2);
	assert_eq!(sampler.loops[0].loop_type, SamplerLoopType::Forward);
	assert_eq!(sampler.loops[0].start, 100);
	assert_eq!(sampler.loops[0].end, 200);
	assert_eq!(sampler.loops[1].loop_type, SamplerLoopType::Reverse);
}

#[test]
fn reader_rejects_malformed_containers() {
	assert!(matches!(
		read_info(&mut Cursor::new(b"RIFX\x00\x00\x00\x00WAVE".to_vec())),
		Err(WaveError::InvalidMagic(_))
	));

	let mut tiny = b"RIFF".to_vec();
	tiny.extend_from_slice(&4u32.to_le_bytes());
	tiny.extend_from_slice(b"WAVE");
	assert!(matches!(
		read_info(&mut Cursor::new(tiny)),
		Err(WaveError::DeclaredSizeTooSmall { declared: 4, .. })
	));

	let mut avi = b"RIFF".to_vec();
	avi.extend_from_slice(&100u32.to_le_bytes());
	avi.extend_from_slice(b"AVI ");
	assert!(matches!(
		read_info(&mut Cursor::new(avi)),
		Err(WaveError::NotWave(_))
	));
}

#[test]
fn reader_rejects_unsupported_parameters() {
	// Corrupt the bit depth field of an otherwise valid file
	let mut bytes = build_wave(&[0u8; 4], None);
	bytes[34..36].copy_from_slice(&33u16.to_le_bytes());
	assert!(matches!(
		read_info(&mut Cursor::new(bytes)),
		Err(WaveError::UnsupportedBitDepth(33))
	));

	let mut bytes = build_wave(&[0u8; 4], None);
	bytes[22..24].copy_from_slice(&40000u16.to_le_bytes());
	assert!(matches!(
		read_info(&mut Cursor::new(bytes)),
		Err(WaveError::UnsupportedChannels(40000))
	));

	let mut bytes = build_wave(&[0u8; 4], None);
	bytes[22..24].copy_from_slice(&0u16.to_le_bytes());
	assert!(matches!(
		read_info(&mut Cursor::new(bytes)),
		Err(WaveError::UnsupportedChannels(0))
	));
}

#[test]
fn reader_rejects_wrapping_sampler_loop_count() {
	// loop_count * 24 wraps a u32 to 8, which would slip past a narrow
	// size check
	let hostile_count = 178_956_971u32;
	let mut smpl = Vec::new();
	for v in [0u32, 0, 45351, 60, 0, 0, 0, hostile_count, 0] {
		smpl.extend_from_slice(&v.to_le_bytes());
	}
	smpl.extend_from_slice(&[0u8; 24]);

	let bytes = build_wave(&[0u8; 4], Some((b"smpl", &smpl)));
	assert!(matches!(
		read_info(&mut Cursor::new(bytes)),
		Err(WaveError::MalformedSamplerChunk {
			size: 60,
			loops,
		}) if loops == hostile_count
	));
}

#[test]
fn sampler_chunk_write_read_round_trip() {
	let sampler = SamplerInfo {
		chunk: SamplerChunk {
			manufacturer: 0,
			product: 0,
			sample_period: 45351,
			midi_unity_note: 64,
			midi_pitch_frac: 0,
			smpte_format: 0,
			smpte_offset: 0,
			loop_count: 1,
			vendor_data: 0,
		},
		loops: vec![SamplerLoop {
			id: 0,
			loop_type: SamplerLoopType::Forward,
			start: 10,
			end: 90,
			fraction: 0,
			play_count: 0,
		}],
	};

	let mut out = Vec::new();
	write_header(&pcm_spec(1, 22050, 2), Some(&sampler), 200, &mut out).unwrap();
	out.extend_from_slice(&[0u8; 200]);

	let info = read_info(&mut Cursor::new(out)).unwrap();
	let parsed = info.sampler.unwrap();
	assert_eq!(parsed.chunk.midi_unity_note, 64);
	assert_eq!(parsed.loops, sampler.loops);
}

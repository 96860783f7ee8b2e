//! Benchmark suite for the ADPCM codec engines
//!
//! Measures decode (and ADPCM-B encode) throughput over synthetic nibble
//! streams of increasing size.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use chipsamp_benches::{generate_adpcm_stream, generate_dsp_stream};
use chipsamp_types::codec::dsp;
use chipsamp_types::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const SIZES: [usize; 3] = [4 * 1024, 64 * 1024, 1024 * 1024];

fn bench_adpcm_a_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_a_decode");

	for size in SIZES {
		let data = generate_adpcm_stream(size);
		// Two samples per input byte
		group.throughput(Throughput::Elements(size as u64 * 2));
		group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
			b.iter(|| {
				let mut decoder = AdpcmADecoder::new();
				black_box(decoder.decode(black_box(data)))
			});
		});
	}

	group.finish();
}

fn bench_adpcm_b_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_b_decode");

	for size in SIZES {
		let data = generate_adpcm_stream(size);
		group.throughput(Throughput::Elements(size as u64 * 2));
		group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
			b.iter(|| {
				let mut decoder = AdpcmBDecoder::new();
				black_box(decoder.decode(black_box(data)))
			});
		});
	}

	group.finish();
}

fn bench_adpcm_b_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("adpcm_b_encode");

	for size in SIZES {
		// A decoded stream makes a representative PCM input
		let pcm = AdpcmBDecoder::new().decode(&generate_adpcm_stream(size));
		group.throughput(Throughput::Elements(pcm.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(size), &pcm, |b, pcm| {
			b.iter(|| {
				let mut encoder = AdpcmBEncoder::new();
				let mut out = encoder.encode(black_box(pcm));
				out.extend(encoder.finish());
				black_box(out)
			});
		});
	}

	group.finish();
}

fn bench_dsp_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("dsp_decode");

	let ctx = DspContext {
		coefs: [
			1024, -512, 2048, -1024, 512, 256, 3000, -1500, 100, 50, 0, 0, 4096, -2048, 64, -32,
		],
		..Default::default()
	};

	for size in SIZES {
		let data = generate_dsp_stream(size);
		let samples = (size as u32 / dsp::BYTES_PER_FRAME) * dsp::SAMPLES_PER_FRAME;
		group.throughput(Throughput::Elements(samples as u64));
		group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
			b.iter(|| black_box(dsp::decode(black_box(data), &ctx, samples)));
		});
	}

	group.finish();
}

criterion_group!(
	benches,
	bench_adpcm_a_decode,
	bench_adpcm_b_decode,
	bench_adpcm_b_encode,
	bench_dsp_decode
);
criterion_main!(benches);

//! ADPCM-A sample decoder.
//!
//! Decodes a raw YM2610 ADPCM-A nibble stream (as ripped from a Neo Geo
//! sample ROM) into a mono 16-bit WAV file at the fixed 18.5 kHz hardware
//! playback rate.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chipsamp_rs::prelude::*;
use clap::Parser;
use log::info;

/// ADPCM-A channels always play at this rate
const SAMPLE_RATE: u32 = 18500;

/// Input is consumed in blocks of this many bytes
const BLOCK_SIZE: usize = 256 * 1024;

#[derive(Parser)]
#[command(name = "adpcma")]
#[command(version)]
#[command(about = "Decode a raw YM2610 ADPCM-A stream to WAV", long_about = None)]
struct Cli {
	/// Raw ADPCM-A input file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output WAV file
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let mut input = File::open(&cli.input)
		.with_context(|| format!("cannot open {}", cli.input.display()))?;

	// Decode block by block; the decoder state carries across blocks
	let mut decoder = AdpcmADecoder::new();
	let mut pcm = Vec::new();
	let mut block = vec![0u8; BLOCK_SIZE];
	loop {
		let n = input.read(&mut block)?;
		if n == 0 {
			break;
		}
		pcm.extend(decoder.decode(&block[..n]));
	}
	info!("decoded {} samples", pcm.len());

	let data: Vec<u8> = pcm.iter().flat_map(|s| s.to_le_bytes()).collect();
	let spec = WaveSpec {
		format: file::wave::FORMAT_PCM,
		channels: 1,
		rate: SAMPLE_RATE,
		byte_depth: 2,
	};
	let mut output = File::create(&cli.output)
		.with_context(|| format!("cannot create {}", cli.output.display()))?;
	file::wave::write(&spec, &data, &mut output)
		.with_context(|| format!("cannot write {}", cli.output.display()))?;

	info!("wrote {}", cli.output.display());
	Ok(())
}

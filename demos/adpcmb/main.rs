//! ADPCM-B encoder/decoder.
//!
//! Converts between raw YM2610 ADPCM-B ("deltaT") streams and mono 16-bit
//! WAV files. The playback rate can be given directly or derived from the
//! chip's deltaT-N register value.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chipsamp_rs::prelude::*;
use clap::Parser;
use log::info;

/// Rate used when neither `-s` nor `-r` is given
const DEFAULT_RATE: u32 = 22050;

/// Default YM2610 chip clock in Hz
const DEFAULT_CLOCK: u32 = 4_000_000;

/// Input is consumed in blocks of this many bytes
const BLOCK_SIZE: usize = 2 * 1024;

#[derive(Parser)]
#[command(name = "adpcmb")]
#[command(version)]
#[command(about = "Encode or decode YM2610 ADPCM-B streams", long_about = None)]
struct Cli {
	/// Decode a raw ADPCM-B stream to WAV
	#[arg(short = 'd', long, conflicts_with = "encode")]
	decode: bool,

	/// Encode a mono 16-bit WAV file to a raw ADPCM-B stream
	#[arg(short = 'e', long)]
	encode: bool,

	/// Playback sample rate in Hz (decode only)
	#[arg(short = 's', long, value_name = "RATE", conflicts_with = "registers")]
	sample_rate: Option<u32>,

	/// Derive the rate from a deltaT-N register value, with an optional
	/// chip clock in Hz (decode only)
	#[arg(short = 'r', long, value_name = "REGS[,CLOCK]")]
	registers: Option<String>,

	/// Input file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output file
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,
}

/// Parses the `-r regs[,clock]` argument into a sample rate.
fn rate_from_registers(arg: &str) -> Result<u32> {
	let (regs, clock) = match arg.split_once(',') {
		Some((regs, clock)) => (
			regs.parse::<u16>().context("invalid deltaT-N register value")?,
			clock.parse::<u32>().context("invalid chip clock")?,
		),
		None => (
			arg.parse::<u16>().context("invalid deltaT-N register value")?,
			DEFAULT_CLOCK,
		),
	};
	Ok(delta_t_to_sample_rate(regs, clock))
}

fn run_decode(cli: &Cli) -> Result<()> {
	let rate = match (&cli.registers, cli.sample_rate) {
		(Some(arg), _) => rate_from_registers(arg)?,
		(None, Some(rate)) => rate,
		(None, None) => DEFAULT_RATE,
	};

	let mut input = File::open(&cli.input)
		.with_context(|| format!("cannot open {}", cli.input.display()))?;

	let mut decoder = AdpcmBDecoder::new();
	let mut pcm = Vec::new();
	let mut block = vec![0u8; BLOCK_SIZE];
	loop {
		let n = input.read(&mut block)?;
		if n == 0 {
			break;
		}
		pcm.extend(decoder.decode(&block[..n]));
	}
	info!("decoded {} samples at {} Hz", pcm.len(), rate);

	let data: Vec<u8> = pcm.iter().flat_map(|s| s.to_le_bytes()).collect();
	let spec = WaveSpec {
		format: file::wave::FORMAT_PCM,
		channels: 1,
		rate,
		byte_depth: 2,
	};
	let mut output = File::create(&cli.output)
		.with_context(|| format!("cannot create {}", cli.output.display()))?;
	file::wave::write(&spec, &data, &mut output)?;
	Ok(())
}

fn run_encode(cli: &Cli) -> Result<()> {
	let mut input = File::open(&cli.input)
		.with_context(|| format!("cannot open {}", cli.input.display()))?;
	let info = file::wave::read_info(&mut input)?;
	if info.format.channels != 1 || info.format.bit_depth != 16 {
		bail!(
			"only mono 16-bit PCM input is supported, got {} channels at {} bits",
			info.format.channels,
			info.format.bit_depth
		);
	}

	use std::io::{Seek, SeekFrom, Write};
	input.seek(SeekFrom::Start(info.data_offset))?;

	let mut output = File::create(&cli.output)
		.with_context(|| format!("cannot create {}", cli.output.display()))?;

	let mut encoder = AdpcmBEncoder::new();
	let mut block = vec![0u8; BLOCK_SIZE];
	let mut remaining = info.data_len as usize;
	let mut encoded = 0usize;
	while remaining > 0 {
		let n = remaining.min(BLOCK_SIZE) & !1; // whole samples only
		if n == 0 {
			break;
		}
		input.read_exact(&mut block[..n])?;
		let pcm: Vec<i16> = block[..n]
			.chunks_exact(2)
			.map(|b| i16::from_le_bytes([b[0], b[1]]))
			.collect();
		let adpcm = encoder.encode(&pcm);
		output.write_all(&adpcm)?;
		encoded += adpcm.len();
		remaining -= n;
	}
	if let Some(last) = encoder.finish() {
		output.write_all(&[last])?;
		encoded += 1;
	}

	info!(
		"encoded {} bytes of PCM to {} bytes of ADPCM-B",
		info.data_len, encoded
	);
	Ok(())
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	if cli.encode {
		run_encode(&cli)
	} else if cli.decode {
		run_decode(&cli)
	} else {
		bail!("one of -d (decode) or -e (encode) is required");
	}
}

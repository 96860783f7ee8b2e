//! GameCube `.dsp` sample decoder.
//!
//! Decodes one `.dsp` file to a mono WAV, or a left/right pair of `.dsp`
//! files to a stereo WAV. The output path defaults to the first input with
//! a `.wav` extension.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chipsamp_rs::prelude::*;
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "dspdecode")]
#[command(version)]
#[command(about = "Decode GameCube .dsp samples to WAV", long_about = None)]
struct Cli {
	/// Input .dsp file (left channel for stereo pairs)
	#[arg(value_name = "LEFT")]
	left: PathBuf,

	/// Right channel .dsp file of a stereo pair
	#[arg(value_name = "RIGHT")]
	right: Option<PathBuf>,

	/// Output WAV file (defaults to LEFT with a .wav extension)
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,
}

fn read_dsp(path: &PathBuf) -> Result<DspFile> {
	let mut file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
	let dsp =
		DspFile::read(&mut file).with_context(|| format!("cannot parse {}", path.display()))?;
	if dsp.is_looped() {
		info!(
			"{}: {} samples at {} Hz, loop {}..{}",
			path.display(),
			dsp.sample_count,
			dsp.sample_rate,
			dsp.loop_start_sample(),
			dsp.loop_end_sample()
		);
	} else {
		info!(
			"{}: {} samples at {} Hz",
			path.display(),
			dsp.sample_count,
			dsp.sample_rate
		);
	}
	Ok(dsp)
}

fn pcm_bytes(pcm: &[i16]) -> Vec<u8> {
	pcm.iter().flat_map(|s| s.to_le_bytes()).collect()
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let output = cli
		.output
		.unwrap_or_else(|| cli.left.with_extension("wav"));

	let left = read_dsp(&cli.left)?;
	let mut spec = WaveSpec {
		format: file::wave::FORMAT_PCM,
		channels: 1,
		rate: left.sample_rate,
		byte_depth: 2,
	};

	let mut out = File::create(&output)
		.with_context(|| format!("cannot create {}", output.display()))?;
	match &cli.right {
		None => {
			let data = pcm_bytes(&left.decode());
			file::wave::write(&spec, &data, &mut out)?;
		}
		Some(right_path) => {
			let right = read_dsp(right_path)?;
			if right.sample_rate != left.sample_rate || right.sample_count != left.sample_count {
				bail!("stereo pair does not match: {} / {}", cli.left.display(), right_path.display());
			}
			spec.channels = 2;
			let planes = [pcm_bytes(&left.decode()), pcm_bytes(&right.decode())];
			file::wave::write_planar(
				&spec,
				&[planes[0].as_slice(), planes[1].as_slice()],
				&mut out,
			)?;
		}
	}

	info!("wrote {}", output.display());
	Ok(())
}

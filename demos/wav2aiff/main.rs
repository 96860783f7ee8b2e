//! WAVE to AIFF sample converter.
//!
//! Converts a PCM WAV file (optionally carrying sampler loops) to AIFF,
//! translating sampler loops into AIFF markers and an instrument chunk.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chipsamp_rs::prelude::*;
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "wav2aiff")]
#[command(version)]
#[command(about = "Convert a PCM WAV file to AIFF", long_about = None)]
struct Cli {
	/// Input WAV file
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output AIFF file
	#[arg(value_name = "OUTPUT", default_value = "out.aif")]
	output: PathBuf,

	/// Print the harvested WAVE info as JSON and exit
	#[arg(long)]
	info: bool,
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let mut input = File::open(&cli.input)
		.with_context(|| format!("cannot open {}", cli.input.display()))?;

	if cli.info {
		let wave_info = file::wave::read_info(&mut input)?;
		println!("{}", serde_json::to_string_pretty(&wave_info)?);
		return Ok(());
	}

	let output = File::create(&cli.output)
		.with_context(|| format!("cannot create {}", cli.output.display()))?;
	wave_to_aiff(&mut input, output)
		.with_context(|| format!("cannot convert {}", cli.input.display()))?;

	info!("wrote {}", cli.output.display());
	Ok(())
}

//! YM2610 sample extractor for VGM logs.
//!
//! Scans an uncompressed VGM stream for ADPCM data blocks and dumps each
//! one to `smpa_<n>.pcm` (ADPCM-A) or `smpb_<n>.pcm` (ADPCM-B) next to the
//! input, printing a JSON manifest of everything extracted.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chipsamp_rs::prelude::*;
use clap::Parser;
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "vgmextract")]
#[command(version)]
#[command(about = "Extract YM2610 ADPCM sample blocks from a VGM file", long_about = None)]
struct Cli {
	/// Uncompressed VGM input file (inflate .vgz first)
	#[arg(value_name = "INPUT")]
	input: PathBuf,
}

/// One extracted sample block, as listed in the manifest.
#[derive(Debug, Serialize)]
struct ManifestEntry {
	kind: AdpcmKind,
	file: PathBuf,
	bytes: usize,
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let input = File::open(&cli.input)
		.with_context(|| format!("cannot open {}", cli.input.display()))?;
	let dir = cli.input.parent().map(PathBuf::from).unwrap_or_default();

	let mut manifest = Vec::new();
	let mut counts = (0u32, 0u32);
	let mut scanner = VgmScanner::new(BufReader::new(input));
	while let Some((kind, payload)) = scanner.next_block()? {
		let name = match kind {
			AdpcmKind::A => {
				counts.0 += 1;
				format!("smpa_{}.pcm", counts.0)
			}
			AdpcmKind::B => {
				counts.1 += 1;
				format!("smpb_{}.pcm", counts.1)
			}
		};
		let path = dir.join(name);
		fs::write(&path, &payload)
			.with_context(|| format!("cannot write {}", path.display()))?;
		info!("{}: {} bytes", path.display(), payload.len());
		manifest.push(ManifestEntry {
			kind,
			file: path,
			bytes: payload.len(),
		});
	}

	println!("{}", serde_json::to_string_pretty(&manifest)?);
	Ok(())
}

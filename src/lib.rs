#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `chipsamp-rs` converts sample data between the compressed ADPCM formats of
//! retro console sound hardware (YM2610 ADPCM-A/B, GameCube DSP-ADPCM) and
//! standard interchange containers (RIFF/WAVE, AIFF).
//!
//! The codec engines and container support live in [`chipsamp_types`]; this
//! crate re-exports them and hosts the command line converters under `demos/`.

pub use chipsamp_types;

/// `use chipsamp_rs::prelude::*;` to import commonly used items.
pub mod prelude {
	#[doc(inline)]
	pub use chipsamp_types::prelude::*;
}

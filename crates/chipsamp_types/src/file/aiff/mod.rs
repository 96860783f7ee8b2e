//! AIFF (Audio Interchange File Format) writing support.
//!
//! AIFF is the big-endian branch of the IFF chunk family: a `FORM` umbrella
//! whose declared size covers every chunk after the outer header, with each
//! chunk padded to an even byte length. This module provides an incremental
//! writer that can either precompute the `FORM` size up front (when the
//! final sample count is known, the common case for converters) or patch it
//! by seeking back on close.
//!
//! # Chunks
//!
//! | Chunk  | Content                                              |
//! |--------|------------------------------------------------------|
//! | `COMM` | channels, frame count, bit depth, 80-bit sample rate |
//! | `SSND` | sound data, appendable across multiple writes        |
//! | `MARK` | markers (id, frame position, pascal-string name)     |
//! | `INST` | MIDI note/velocity ranges and sustain/release loops  |
//!
//! # Examples
//!
//! ```no_run
//! use chipsamp_types::file::aiff::{AiffWriter, ChunkKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = std::fs::File::create("tone.aif")?;
//! let mut writer = AiffWriter::new(file);
//!
//! // 1 channel, 8 frames, 16-bit, 22050 Hz
//! writer.write_common(1, 8, 16, 22050)?;
//! writer.write_sound_frames(&[0u8; 16])?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

mod extended;
mod types;
mod writer;

pub use extended::Extended;
pub use types::{ChunkKind, Instrument, Loop, Marker, PlayMode};
pub use writer::AiffWriter;

//! ADPCM sample block extraction from VGM command streams.
//!
//! VGM logs chip writes as a byte-oriented command stream. Sample ROM
//! uploads travel in `0x67 0x66 <type>` data blocks; types `0x82` and
//! `0x83` hold YM2610 ADPCM-A and ADPCM-B ROM images. The scanner walks
//! the stream byte by byte rather than decoding every command, so it also
//! works on streams whose header version it has never heard of; the cost
//! is that a sample payload could in principle fake a data block, which
//! has not been seen in practice.

use std::io::{ErrorKind, Read};

use serde::{Deserialize, Serialize};

use crate::file::VgmError;

/// Which YM2610 sample ROM a data block targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdpcmKind {
	/// ADPCM-A, the six 18.5 kHz rhythm channels
	A,
	/// ADPCM-B, the variable-rate DeltaT channel
	B,
}

/// Streaming scanner over a VGM command stream.
///
/// Yields the payload of every ADPCM data block in stream order. The
/// 8-byte ROM size/offset preamble of each block is skipped, leaving the
/// raw sample bytes.
#[derive(Debug)]
pub struct VgmScanner<R> {
	stream: R,
}

impl<R: Read> VgmScanner<R> {
	/// Wraps a readable VGM stream. Uncompressed streams only; `.vgz`
	/// input must be inflated first.
	pub fn new(stream: R) -> Self {
		Self { stream }
	}

	/// Reads one byte, mapping a clean EOF to `None`.
	fn next_byte(&mut self) -> Result<Option<u8>, VgmError> {
		let mut buf = [0u8; 1];
		match self.stream.read_exact(&mut buf) {
			Ok(()) => Ok(Some(buf[0])),
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	fn read_block(&mut self, kind: AdpcmKind) -> Result<Option<(AdpcmKind, Vec<u8>)>, VgmError> {
		let mut buf = [0u8; 4];
		match self.stream.read_exact(&mut buf) {
			Ok(()) => {}
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
			Err(e) => return Err(e.into()),
		}
		let len = u32::from_le_bytes(buf);
		if len < 8 {
			return Err(VgmError::BlockTooShort(len));
		}

		// ROM size and start offset, not needed for extraction
		let mut preamble = [0u8; 8];
		self.stream.read_exact(&mut preamble)?;

		let mut payload = vec![0u8; (len - 8) as usize];
		self.stream.read_exact(&mut payload)?;
		Ok(Some((kind, payload)))
	}

	/// Scans forward to the next ADPCM data block.
	///
	/// Returns `Ok(None)` once the stream is exhausted. Bytes consumed
	/// while matching the block introducer are never re-examined, matching
	/// a plain byte-at-a-time scan.
	pub fn next_block(&mut self) -> Result<Option<(AdpcmKind, Vec<u8>)>, VgmError> {
		loop {
			match self.next_byte()? {
				None => return Ok(None),
				Some(0x67) => {}
				Some(_) => continue,
			}
			match self.next_byte()? {
				None => return Ok(None),
				Some(0x66) => {}
				Some(_) => continue,
			}
			match self.next_byte()? {
				None => return Ok(None),
				Some(0x82) => return self.read_block(AdpcmKind::A),
				Some(0x83) => return self.read_block(AdpcmKind::B),
				Some(_) => continue,
			}
		}
	}
}

impl<R: Read> Iterator for VgmScanner<R> {
	type Item = Result<(AdpcmKind, Vec<u8>), VgmError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_block().transpose()
	}
}

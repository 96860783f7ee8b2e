//! 80-bit IEEE 754 extended-precision float packing.
//!
//! AIFF stores the sample rate as an 80-bit extended float: a sign bit and
//! 15-bit exponent followed by a 64-bit mantissa with an explicit integer
//! bit. Only integral rates occur in practice, so conversion from unsigned
//! integers via leading-zero normalization covers the writer's needs.

/// An 80-bit extended-precision float, split into its two packed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extended {
	/// Sign bit and 15-bit biased exponent
	pub sign_exponent: u16,
	/// 64-bit mantissa with explicit leading integer bit
	pub mantissa: u64,
}

/// Exponent bias of the 80-bit format
const EXPONENT_BIAS: u16 = 0x3FFF;

impl Extended {
	/// Converts an unsigned 32-bit integer; zero maps to all-zero bits.
	pub fn from_u32(value: u32) -> Self {
		if value == 0 {
			return Self::default();
		}
		let leading_zeroes = value.leading_zeros() as u16;
		Self {
			sign_exponent: 31 - leading_zeroes + EXPONENT_BIAS,
			mantissa: ((value as u64) << 32) << leading_zeroes,
		}
	}

	/// Converts an unsigned 64-bit integer; zero maps to all-zero bits.
	pub fn from_u64(value: u64) -> Self {
		if value == 0 {
			return Self::default();
		}
		let leading_zeroes = value.leading_zeros() as u16;
		Self {
			sign_exponent: 63 - leading_zeroes + EXPONENT_BIAS,
			mantissa: value << leading_zeroes,
		}
	}

	/// Packs into the 10-byte big-endian layout AIFF expects.
	pub fn to_be_bytes(self) -> [u8; 10] {
		let mut packed = [0u8; 10];
		packed[..2].copy_from_slice(&self.sign_exponent.to_be_bytes());
		packed[2..].copy_from_slice(&self.mantissa.to_be_bytes());
		packed
	}
}

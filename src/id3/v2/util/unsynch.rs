//! Unsynchronisation and syncsafe integers
//!
//! An MPEG frame starts with a "frame sync" of 11 set bits. To keep decoders that
//! are not ID3v2 aware from locking onto tag bytes, ID3v2 can stuff a `0x00` after
//! every `0xFF` that could otherwise start a false sync, and stores its sizes with
//! only 7 significant bits per byte.

use crate::error::{Result, TagError};

/// The largest value a syncsafe integer can hold, plus one
const SYNCHSAFE_LIMIT: u32 = 0x1000_0000;

/// Returns the syncsafe variant of a `u32` value
///
/// # Errors
///
/// `n` does not fit in 28 bits
pub fn synch_u32(n: u32) -> Result<u32> {
	if n >= SYNCHSAFE_LIMIT {
		return Err(TagError::TooMuchData);
	}

	let mut x: u32 = n & 0x7F | (n & 0xFFFF_FF80) << 1;
	x = x & 0x7FFF | (x & 0xFFFF_8000) << 1;
	x = x & 0x7F_FFFF | (x & 0xFF80_0000) << 1;
	Ok(x)
}

/// Decodes a syncsafe `u32`
///
/// Only the low 7 bits of each byte are used, the most significant bit of each byte is ignored.
pub fn unsynch_u32(n: u32) -> u32 {
	n & 0x7F | (n & 0x7F00) >> 1 | (n & 0x7F_0000) >> 2 | (n & 0x7F00_0000) >> 3
}

/// [`synch_u32`], as the 4 big endian bytes written to a tag
///
/// # Errors
///
/// `n` does not fit in 28 bits
pub fn synch_bytes(n: u32) -> Result<[u8; 4]> {
	synch_u32(n).map(u32::to_be_bytes)
}

/// [`unsynch_u32`], reading the 4 big endian bytes of a tag
pub fn unsynch_bytes(bytes: [u8; 4]) -> u32 {
	unsynch_u32(u32::from_be_bytes(bytes))
}

/// Applies the unsynchronisation scheme
///
/// A `0x00` is inserted after every `0xFF` that is followed by either `0x00` or a byte
/// with its 3 most significant bits set (`>= 0xE0`).
pub fn unsynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len() + content.len() / 8);

	for (i, byte) in content.iter().enumerate() {
		out.push(*byte);

		if *byte == 0xFF {
			if let Some(next) = content.get(i + 1) {
				if *next == 0x00 || *next >= 0xE0 {
					out.push(0x00);
				}
			}
		}
	}

	out
}

/// Undoes [`unsynchronise`]
///
/// Every `0x00` directly following a `0xFF` is removed.
pub fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());
	let mut discard = false;

	for byte in content {
		if discard && *byte == 0x00 {
			discard = false;
			continue;
		}

		out.push(*byte);
		discard = *byte == 0xFF;
	}

	out
}

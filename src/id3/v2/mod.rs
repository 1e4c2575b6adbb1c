//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [Id3v2Tag]
//! * [Frame]
//! * [FrameList]
mod flags;
mod frame;
pub(crate) mod read;
pub(crate) mod tag;
pub mod util;
pub(crate) mod write;

pub use flags::Id3v2TagFlags;
pub use frame::list::FrameList;
pub use frame::{Frame, FrameFlags};
pub use tag::Id3v2Tag;
pub use util::text_utils::TextEncoding;
pub use write::{remove_id3v2, write_id3v2};

use crate::error::{Result, TagError};
use util::unsynch::unsynch_bytes;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// The size of both the ID3v2 header and footer
pub const ID3V2_HEADER_SIZE: u64 = 10;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
/// The ID3v2 version
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Default for Id3v2Version {
	fn default() -> Self {
		Self::V4
	}
}

impl Id3v2Version {
	/// Get a version from the major revision stored in a tag header
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}

	/// The major revision written to a tag header
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}

	/// The length of a frame identifier in this version
	pub fn frame_id_len(self) -> usize {
		match self {
			Self::V2 => 3,
			Self::V3 | Self::V4 => 4,
		}
	}

	/// The length of a frame header in this version
	pub fn frame_header_len(self) -> usize {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}
}

/// A parsed ID3v2 tag header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	/// The major version
	pub version: Id3v2Version,
	/// The minor revision
	pub revision: u8,
	/// The tag flags
	pub flags: Id3v2TagFlags,
	/// The size of everything between the header and the footer (or the end of the tag),
	/// including the extended header and padding
	pub size: u32,
	/// The size of the extended header, which has already been skipped
	pub extended_size: u32,
}

impl Id3v2Header {
	/// The number of bytes the tag occupies, header and footer included
	pub fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer {
			ID3V2_HEADER_SIZE
		} else {
			0
		};

		ID3V2_HEADER_SIZE + u64::from(self.size) + footer
	}
}

/// Read a tag header, including skipping any extended header
///
/// # Errors
///
/// * The data does not start with "ID3"
/// * The major version is not 2, 3, or 4
/// * The header or extended header is truncated or malformed
pub fn read_id3v2_header<R>(bytes: &mut R) -> Result<Id3v2Header>
where
	R: Read + ?Sized,
{
	let mut header = [0; 10];
	bytes.read_exact(&mut header)?;

	if &header[..3] != b"ID3" {
		return Err(TagError::NoTag);
	}

	// Version is stored as [major, minor]
	let version = match Id3v2Version::from_major(header[3]) {
		Some(version) => version,
		None => return Err(TagError::BadId3v2Version(header[3], header[4])),
	};

	let flags = header[5];

	// Compression was a flag only used in ID3v2.2 (bit 6).
	// No compression scheme was ever decided on for ID3v2.2, so the tag can't be read.
	if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
		return Err(TagError::Corrupt("Encountered a compressed ID3v2.2 tag"));
	}

	let flags = Id3v2TagFlags::from_byte(flags, version);
	let size = unsynch_bytes([header[6], header[7], header[8], header[9]]);

	let mut extended_size = 0;

	if flags.extended_header {
		let declared = bytes.read_u32::<BigEndian>()?;

		// ID3v2.3 doesn't include the size field itself, ID3v2.4 does and stores it syncsafe
		extended_size = match version {
			Id3v2Version::V4 => util::unsynch::unsynch_u32(declared),
			_ => declared.saturating_add(4),
		};

		if extended_size < 6 || extended_size > size {
			return Err(TagError::Corrupt(
				"Found an extended header with an invalid size",
			));
		}

		let mut remaining = (&mut *bytes).take(u64::from(extended_size - 4));
		let skipped = std::io::copy(&mut remaining, &mut std::io::sink())?;

		if skipped < u64::from(extended_size - 4) {
			return Err(TagError::Truncated("Extended header is cut off"));
		}

		log::trace!("Skipped an extended header of {} bytes", extended_size);
	}

	Ok(Id3v2Header {
		version,
		revision: header[4],
		flags,
		size,
		extended_size,
	})
}

#[cfg(test)]
mod tests {
	use super::{read_id3v2_header, Id3v2Version};
	use crate::error::TagError;

	use pretty_assertions::assert_eq;

	#[test]
	fn header() {
		let header =
			read_id3v2_header(&mut &[b'I', b'D', b'3', 3, 0, 0x80, 0, 0, 0x02, 0x01][..]).unwrap();

		assert_eq!(header.version, Id3v2Version::V3);
		assert!(header.flags.unsynchronisation);
		assert_eq!(header.size, 257);
		assert_eq!(header.full_tag_size(), 267);
	}

	#[test]
	fn header_with_footer() {
		let header = read_id3v2_header(&mut &[b'I', b'D', b'3', 4, 0, 0x10, 0, 0, 0, 20][..]).unwrap();

		assert!(header.flags.footer);
		assert_eq!(header.full_tag_size(), 40);
	}

	#[test]
	fn extended_header_skipped() {
		let mut data = vec![b'I', b'D', b'3', 3, 0, 0x40, 0, 0, 0, 30];
		// Size (excludes itself), flags (2), padding size (4)
		data.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 0, 0, 0]);
		data.extend_from_slice(b"TIT2");

		let mut reader = &data[..];
		let header = read_id3v2_header(&mut reader).unwrap();

		assert_eq!(header.extended_size, 10);
		assert_eq!(reader, b"TIT2");
	}

	#[test]
	fn bad_version() {
		let result = read_id3v2_header(&mut &[b'I', b'D', b'3', 5, 1, 0, 0, 0, 0, 0][..]);

		assert!(matches!(result, Err(TagError::BadId3v2Version(5, 1))));
	}

	#[test]
	fn not_a_tag() {
		let result = read_id3v2_header(&mut &[b'T', b'A', b'G', 4, 0, 0, 0, 0, 0, 0][..]);

		assert!(matches!(result, Err(TagError::NoTag)));
	}
}

use super::header::{parse_header, parse_v2_header};
use super::Frame;
use crate::error::{Result, TagError};
use crate::id3::v2::Id3v2Version;

impl Frame {
	/// Read a single frame from the (already resynchronised) frame region
	///
	/// Returns `None` once the padding (or the end of the region) is reached.
	pub(crate) fn read(reader: &mut &[u8], version: Id3v2Version) -> Result<Option<Self>> {
		if reader.len() < version.frame_header_len() {
			return Ok(None);
		}

		// Assume we just started reading padding
		if reader[0] == 0 {
			return Ok(None);
		}

		// The flags will be in the ID3v2.4 layout past this point, so they can all be treated the same
		let (id, size, flags) = match version {
			Id3v2Version::V2 => parse_v2_header(reader)?,
			Id3v2Version::V3 => parse_header(reader, false)?,
			Id3v2Version::V4 => parse_header(reader, true)?,
		};

		let size = size as usize;

		if size > reader.len() {
			return Err(TagError::Corrupt("Frame size exceeds the remaining tag data"));
		}

		let remaining: &[u8] = *reader;
		let (data, rest) = remaining.split_at(size);
		*reader = rest;

		Ok(Some(Self {
			id,
			flags,
			data: data.to_vec(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use crate::error::TagError;
	use crate::id3::v2::{Frame, Id3v2Version};

	use pretty_assertions::assert_eq;

	#[test]
	fn sequential_frames() {
		let region = b"TT2\x00\x00\x02\x00aTAL\x00\x00\x01\x00\x00\x00\x00";
		let reader = &mut &region[..];

		let first = Frame::read(reader, Id3v2Version::V2).unwrap().unwrap();
		assert_eq!(first.id(), "TT2");
		assert_eq!(first.data(), b"\x00a");

		// "TAL" + "\x00\x00\x01" + 1 byte payload
		let second = Frame::read(reader, Id3v2Version::V2).unwrap().unwrap();
		assert_eq!(second.id(), "TAL");
		assert_eq!(second.data(), b"\x00");

		// Padding
		assert_eq!(Frame::read(reader, Id3v2Version::V2).unwrap(), None);
	}

	#[test]
	fn short_region() {
		assert_eq!(
			Frame::read(&mut &b"TIT2\x00\x00"[..], Id3v2Version::V4).unwrap(),
			None
		);
	}

	#[test]
	fn oversized_frame() {
		let region = b"TIT2\x00\x00\x00\x10\x00\x00\x00abc";

		assert!(matches!(
			Frame::read(&mut &region[..], Id3v2Version::V4),
			Err(TagError::Corrupt(_))
		));
	}
}

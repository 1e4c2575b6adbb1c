//! Locating and reading ID3 tags
//!
//! An `ID3v2` tag sits at offset 0, an ID3v1 tag takes the last 128 bytes. A file
//! may carry both. See [`v1`] and [`v2`] for the formats themselves.

pub mod v1;
pub mod v2;

use crate::error::Result;
use crate::source::ByteSource;
use v1::{Id3v1Tag, ID3V1_TAG_SIZE};
use v2::{read_id3v2_header, Id3v2Header, Id3v2Tag};

use std::io::{Read, Seek, SeekFrom};

/// Look for an ID3v1 tag in the last 128 bytes
///
/// If a tag exists, the reader is left at its start, otherwise at the end of the data.
pub(crate) fn find_id3v1<R>(data: &mut R, read: bool) -> Result<(bool, Option<Id3v1Tag>)>
where
	R: ByteSource + ?Sized,
{
	let len = data.total_len()?;

	if len < ID3V1_TAG_SIZE {
		data.seek(SeekFrom::End(0))?;
		return Ok((false, None));
	}

	data.seek(SeekFrom::Start(len - ID3V1_TAG_SIZE))?;

	let mut id3v1_tag = [0; 128];
	data.read_exact(&mut id3v1_tag)?;

	if &id3v1_tag[..3] != b"TAG" {
		// No ID3v1 tag found
		return Ok((false, None));
	}

	data.seek(SeekFrom::Start(len - ID3V1_TAG_SIZE))?;

	let id3v1 = read.then(|| v1::parse_id3v1(id3v1_tag));
	Ok((true, id3v1))
}

/// Look for an ID3v2 tag at the start of the data
///
/// If a tag exists, the reader is left at the start of its frames, otherwise at the start of the data.
///
/// # Errors
///
/// A tag is found, but its header is invalid
pub(crate) fn find_id3v2<R>(data: &mut R) -> Result<Option<Id3v2Header>>
where
	R: ByteSource + ?Sized,
{
	data.seek(SeekFrom::Start(0))?;

	let mut marker = [0; 3];
	let read = data.read_up_to(&mut marker)?;

	data.seek(SeekFrom::Start(0))?;

	if read < 3 || &marker != b"ID3" {
		return Ok(None);
	}

	read_id3v2_header(data).map(Some)
}

/// Read the ID3v1 tag at the end of the data, if one exists
///
/// # Errors
///
/// Any IO error
pub fn read_id3v1<R>(data: &mut R) -> Result<Option<Id3v1Tag>>
where
	R: ByteSource + ?Sized,
{
	let (_, tag) = find_id3v1(data, true)?;
	Ok(tag)
}

/// Read the ID3v2 tag at the start of the data, if one exists
///
/// # Errors
///
/// * The tag header is invalid, see [`read_id3v2_header`]
/// * The tag is shorter than its header claims
pub fn read_id3v2<R>(data: &mut R) -> Result<Option<Id3v2Tag>>
where
	R: ByteSource + ?Sized,
{
	match find_id3v2(data)? {
		Some(header) => v2::read::parse_id3v2(data, header).map(Some),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::{find_id3v1, find_id3v2, read_id3v1};

	use std::io::{Cursor, Seek};

	use pretty_assertions::assert_eq;

	#[test]
	fn short_data_has_no_tags() {
		let mut data = Cursor::new(vec![b'T', b'A', b'G']);

		assert_eq!(find_id3v1(&mut data, true).unwrap(), (false, None));
		assert_eq!(find_id3v2(&mut data).unwrap(), None);
	}

	#[test]
	fn id3v1_position() {
		let mut data = vec![0; 10];
		data.extend_from_slice(b"TAG");
		data.resize(138, 0);
		data[137] = 0xFF;

		let mut data = Cursor::new(data);

		let (exists, tag) = find_id3v1(&mut data, false).unwrap();
		assert!(exists);
		assert_eq!(tag, None);
		assert_eq!(data.stream_position().unwrap(), 10);

		assert!(read_id3v1(&mut data).unwrap().unwrap().is_empty());
	}

	#[test]
	fn id3v2_position() {
		let mut data = Cursor::new(b"ID3\x04\x00\x00\x00\x00\x00\x00audio".to_vec());

		let header = find_id3v2(&mut data).unwrap().unwrap();
		assert_eq!(header.full_tag_size(), 10);
		assert_eq!(data.stream_position().unwrap(), 10);
	}
}

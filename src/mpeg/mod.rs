//! MPEG audio frame probing
//!
//! Tags are only ever stored around the audio, so the crate does not decode audio.
//! This module exists to find where the audio starts, and to describe its first frame.
mod constants;
mod header;

pub use header::{ChannelMode, Layer, MpegHeader, MpegVersion};

use crate::error::{Result, TagError};
use crate::id3::find_id3v2;
use crate::source::ByteSource;
use header::verify_frame_sync;

use std::io::{Seek, SeekFrom};

const SEARCH_CHUNK_SIZE: usize = 8 * 1024;

/// Find the first frame sync at or after `start`
///
/// Returns the offset of the 0xFF byte, or `None` if the data ends first.
///
/// # Errors
///
/// Any IO error
pub fn find_sync_word<R>(source: &mut R, start: u64) -> Result<Option<u64>>
where
	R: ByteSource + ?Sized,
{
	source.seek(SeekFrom::Start(start))?;

	let mut buf = [0; SEARCH_CHUNK_SIZE];
	let mut offset = start;
	// The last byte of the previous chunk, a sync can straddle two chunks
	let mut carry: Option<u8> = None;

	loop {
		let read = source.read_up_to(&mut buf)?;
		if read == 0 {
			return Ok(None);
		}

		let chunk = &buf[..read];

		if let Some(last) = carry {
			if verify_frame_sync(last, chunk[0]) {
				return Ok(Some(offset - 1));
			}
		}

		if let Some(pos) = chunk
			.windows(2)
			.position(|pair| verify_frame_sync(pair[0], pair[1]))
		{
			return Ok(Some(offset + pos as u64));
		}

		carry = chunk.last().copied();
		offset += read as u64;

		if read < SEARCH_CHUNK_SIZE {
			return Ok(None);
		}
	}
}

/// Find and decode the first MPEG frame header after any `ID3v2` tag
///
/// Candidates that fail to decode are skipped, the search continues one byte later.
/// Returns the offset of the frame along with its header.
///
/// # Errors
///
/// * The `ID3v2` tag header is invalid
/// * Any IO error
pub fn first_frame_header<R>(source: &mut R) -> Result<Option<(u64, MpegHeader)>>
where
	R: ByteSource + ?Sized,
{
	let mut start = match find_id3v2(source)? {
		Some(header) => header.full_tag_size(),
		None => 0,
	};

	while let Some(offset) = find_sync_word(source, start)? {
		source.seek(SeekFrom::Start(offset))?;

		let mut bytes = [0; 4];
		if source.read_up_to(&mut bytes)? < 4 {
			return Ok(None);
		}

		match MpegHeader::read(u32::from_be_bytes(bytes)) {
			Ok(header) => {
				log::debug!("Found MPEG frame at offset {offset}");
				return Ok(Some((offset, header)));
			},
			Err(TagError::Corrupt(reason)) => {
				log::trace!("Skipping false frame sync at offset {offset}: {reason}");
				start = offset + 1;
			},
			Err(e) => return Err(e),
		}
	}

	Ok(None)
}

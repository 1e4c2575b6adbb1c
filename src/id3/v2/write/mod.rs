mod frame;

use super::tag::Id3v2Tag;
use super::util::unsynch::{synch_bytes, unsynchronise};
use super::{Id3v2Version, ID3V2_HEADER_SIZE};
use crate::config::WriteOptions;
use crate::error::{Result, TagError};
use crate::id3::find_id3v2;
use crate::source::{shift_tail, TagStore};

use std::io::{Seek, SeekFrom, Write};

/// Write an `ID3v2` tag to the start of a store, replacing any existing one
///
/// If the new tag fits in the space taken by the existing tag, it is written in place
/// and the remaining space becomes padding, so the audio data doesn't move. Otherwise
/// the audio data is moved to make room, and the tag is written with
/// [`WriteOptions::padding`] bytes of padding.
///
/// An empty tag removes the existing tag instead.
///
/// NOTE: The tag is written with its own version and flags. [`WriteOptions::version`] is only
/// used when creating new tags.
///
/// # Errors
///
/// * The existing tag can't be read, see [`read_id3v2_header`](crate::id3::v2::read_id3v2_header)
/// * The tag can't be converted to bytes, see [`Id3v2Tag::dump`]
/// * Any IO error
pub fn write_id3v2<S>(store: &mut S, tag: &Id3v2Tag, options: &WriteOptions) -> Result<()>
where
	S: TagStore + ?Sized,
{
	if tag.is_empty() {
		log::debug!("Writing an empty ID3v2 tag, removing the existing tag");
		remove_id3v2(store)?;
		return Ok(());
	}

	let existing = find_id3v2(store)?.map_or(0, |header| header.full_tag_size());

	let frames = create_frames(tag)?;
	let footer = has_footer(tag);

	let mut unpadded_len = ID3V2_HEADER_SIZE + frames.len() as u64;
	if footer {
		unpadded_len += ID3V2_HEADER_SIZE;
	}

	// A tag with a footer can't have padding, so it has to fit exactly
	let in_place_padding = existing
		.checked_sub(unpadded_len)
		.filter(|padding| *padding == 0 || !footer)
		.and_then(|padding| u32::try_from(padding).ok());

	let id3v2 = match in_place_padding {
		Some(padding) => {
			log::debug!("Rewriting ID3v2 tag in place with {} bytes of padding", padding);
			finish_tag(tag, frames, padding)?
		},
		None => {
			let id3v2 = finish_tag(tag, frames, options.padding)?;
			shift_tail(store, existing, id3v2.len() as u64)?;
			id3v2
		},
	};

	store.seek(SeekFrom::Start(0))?;
	store.write_all(&id3v2)?;
	store.flush()?;

	Ok(())
}

/// Remove the `ID3v2` tag from the start of a store
///
/// Returns `false` if there was no tag to remove.
///
/// # Errors
///
/// * The existing tag can't be read, see [`read_id3v2_header`](crate::id3::v2::read_id3v2_header)
/// * Any IO error
pub fn remove_id3v2<S>(store: &mut S) -> Result<bool>
where
	S: TagStore + ?Sized,
{
	match find_id3v2(store)? {
		Some(header) => {
			shift_tail(store, header.full_tag_size(), 0)?;
			Ok(true)
		},
		None => Ok(false),
	}
}

pub(super) fn create_tag(tag: &Id3v2Tag, padding: u32) -> Result<Vec<u8>> {
	let frames = create_frames(tag)?;
	finish_tag(tag, frames, padding)
}

fn has_footer(tag: &Id3v2Tag) -> bool {
	tag.flags().footer && tag.version() == Id3v2Version::V4
}

// The frame region, unsynchronised if the tag requests it
fn create_frames(tag: &Id3v2Tag) -> Result<Vec<u8>> {
	let mut frames = Vec::new();
	frame::create_items(&mut frames, tag.iter(), tag.version())?;

	if tag.flags().unsynchronisation {
		frames = unsynchronise(&frames);

		// A trailing 0xFF could form a false sync with whatever follows the tag
		if frames.last() == Some(&0xFF) {
			frames.push(0);
		}
	}

	Ok(frames)
}

fn finish_tag(tag: &Id3v2Tag, frames: Vec<u8>, padding: u32) -> Result<Vec<u8>> {
	let footer = has_footer(tag);
	let padding = if footer { 0 } else { padding as usize };

	let size = frames.len() + padding;
	let size = u32::try_from(size).map_err(|_| TagError::TooMuchData)?;

	let mut header = [0; 10];
	header[..3].copy_from_slice(b"ID3");
	// Always revision 0
	header[3] = tag.version().major();
	header[5] = tag.flags().as_byte(tag.version());
	header[6..].copy_from_slice(&synch_bytes(size)?);

	let mut id3v2 = Vec::with_capacity(20 + size as usize);
	id3v2.extend_from_slice(&header);
	id3v2.extend(frames);
	id3v2.resize(id3v2.len() + padding, 0);

	if footer {
		id3v2.extend_from_slice(b"3DI");
		id3v2.extend_from_slice(&header[3..]);
	}

	Ok(id3v2)
}

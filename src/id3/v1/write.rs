use super::tag::Id3v1Tag;
use crate::error::Result;
use crate::id3::find_id3v1;
use crate::source::TagStore;

use std::io::{Seek, SeekFrom, Write};

/// Write an ID3v1 tag to the end of a store
///
/// An existing tag is overwritten in place, otherwise the tag is appended.
/// Writing an empty tag removes the existing tag instead.
///
/// # Errors
///
/// Any IO error
pub fn write_id3v1<S>(store: &mut S, tag: &Id3v1Tag) -> Result<()>
where
	S: TagStore + ?Sized,
{
	if tag.is_empty() {
		remove_id3v1(store)?;
		return Ok(());
	}

	// This will seek us to the writing position
	let (exists, _) = find_id3v1(store, false)?;

	log::debug!(
		"{} ID3v1 tag",
		if exists { "Overwriting" } else { "Appending" }
	);

	store.write_all(&tag.as_bytes())?;
	store.flush()?;

	Ok(())
}

/// Remove the ID3v1 tag from the end of a store
///
/// Returns `false` if there was no tag to remove.
///
/// # Errors
///
/// Any IO error
pub fn remove_id3v1<S>(store: &mut S) -> Result<bool>
where
	S: TagStore + ?Sized,
{
	let (exists, _) = find_id3v1(store, false)?;

	if !exists {
		return Ok(false);
	}

	let start = store.stream_position()?;
	store.truncate(start)?;
	store.seek(SeekFrom::Start(0))?;

	log::debug!("Removed ID3v1 tag");
	Ok(true)
}

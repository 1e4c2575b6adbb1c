use super::frame::Frame;
use super::tag::Id3v2Tag;
use super::util::unsynch::resynchronise;
use super::{Id3v2Header, Id3v2Version};
use crate::error::{Result, TagError};

use std::io::Read;

/// Read the frames of a tag whose header was just read with
/// [`read_id3v2_header`](super::read_id3v2_header)
///
/// A malformed frame stops parsing, the frames read up to that point are kept.
///
/// # Errors
///
/// The reader holds fewer bytes than the header declares
pub(crate) fn parse_id3v2<R>(bytes: &mut R, header: Id3v2Header) -> Result<Id3v2Tag>
where
	R: Read + ?Sized,
{
	let region_len = u64::from(header.size - header.extended_size);

	let mut tag_bytes = Vec::new();
	(&mut *bytes).take(region_len).read_to_end(&mut tag_bytes)?;

	if (tag_bytes.len() as u64) < region_len {
		return Err(TagError::Truncated("Tag is shorter than its header claims"));
	}

	if header.flags.unsynchronisation {
		tag_bytes = resynchronise(&tag_bytes);
	}

	let mut tag = Id3v2Tag::new(header.version);
	tag.set_revision(header.revision);
	tag.set_flags(header.flags);
	tag.original_size = Some(header.full_tag_size());

	let reader = &mut &*tag_bytes;

	loop {
		match Frame::read(reader, header.version) {
			Ok(None) => break,
			Ok(Some(mut frame)) => {
				if frame.flags.unsynchronised() {
					if header.version == Id3v2Version::V4 && !header.flags.unsynchronisation {
						frame.data = resynchronise(&frame.data);
					}

					// The data is stored decoded from here on
					frame.flags.set_unsynchronised(false);
				}

				tag.push(frame)
			},
			Err(err) => {
				log::warn!(
					"Stopped reading ID3v2 frames after {} frame(s): {}",
					tag.len(),
					err
				);
				break;
			},
		}
	}

	Ok(tag)
}

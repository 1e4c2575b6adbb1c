use crate::error::{Result, TagError};
use crate::id3::v2::util::unsynch::synch_u32;
use crate::id3::v2::{Frame, FrameFlags, Id3v2Version};

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

pub(in crate::id3::v2) fn create_items<'a, W>(
	writer: &mut W,
	frames: impl Iterator<Item = &'a Frame>,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	for frame in frames {
		if frame.id().len() != version.frame_id_len() {
			log::error!(
				"Frame \"{}\" can't be written to an ID3v{}.0 tag",
				frame.id(),
				version.major()
			);
			return Err(TagError::BadFrameId);
		}

		write_frame_header(writer, frame.id(), frame.size(), frame.flags(), version)?;
		writer.write_all(frame.data())?;
	}

	Ok(())
}

fn write_frame_header<W>(
	writer: &mut W,
	name: &str,
	len: usize,
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	let len = u32::try_from(len).map_err(|_| TagError::TooMuchData)?;

	writer.write_all(name.as_bytes())?;

	match version {
		Id3v2Version::V2 => {
			if len > 0xFF_FFFF {
				return Err(TagError::TooMuchData);
			}

			writer.write_u24::<BigEndian>(len)?;
		},
		Id3v2Version::V3 => {
			writer.write_u32::<BigEndian>(len)?;
			writer.write_all(&flags.as_v3())?;
		},
		Id3v2Version::V4 => {
			writer.write_u32::<BigEndian>(synch_u32(len)?)?;

			// Frames are never unsynchronised on their own when writing
			let mut flags = flags;
			flags.set_unsynchronised(false);

			writer.write_u8(flags.status)?;
			writer.write_u8(flags.format)?;
		},
	}

	Ok(())
}

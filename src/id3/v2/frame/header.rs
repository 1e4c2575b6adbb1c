use super::{verify_id, FrameFlags};
use crate::error::{Result, TagError};
use crate::id3::v2::util::unsynch::unsynch_u32;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) fn parse_v2_header<R>(reader: &mut R) -> Result<(String, u32, FrameFlags)>
where
	R: Read,
{
	let mut id = [0; 3];
	reader.read_exact(&mut id)?;

	let id = create_frame_id(&id)?;
	let size = reader.read_u24::<BigEndian>()?;

	// V2 doesn't store flags
	Ok((id, size, FrameFlags::default()))
}

pub(crate) fn parse_header<R>(reader: &mut R, synchsafe: bool) -> Result<(String, u32, FrameFlags)>
where
	R: Read,
{
	let mut id = [0; 4];
	reader.read_exact(&mut id)?;

	let id = create_frame_id(&id)?;

	let size = reader.read_u32::<BigEndian>()?;
	let status = reader.read_u8()?;
	let format = reader.read_u8()?;

	let (size, flags) = if synchsafe {
		(unsynch_u32(size), FrameFlags { status, format })
	} else {
		(size, FrameFlags::from_v3(status, format))
	};

	Ok((id, size, flags))
}

fn create_frame_id(id: &[u8]) -> Result<String> {
	verify_id(id)?;

	// Only ASCII survives verification
	std::str::from_utf8(id)
		.map(str::to_string)
		.map_err(|_| TagError::BadFrameId)
}

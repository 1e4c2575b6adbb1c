mod header;
pub(crate) mod list;
pub(super) mod read;

use crate::content::Content;
use crate::error::{Result, TagError};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Represents an `ID3v2` frame
///
/// The identifier is an opaque key, any 3 or 4 character combination of uppercase
/// letters and digits is accepted. Whether it matches the version of the tag it is
/// written to is only checked when writing.
///
/// The payload is kept exactly as it was read (after undoing unsynchronisation), so
/// frames that can't be interpreted are still written back untouched.
pub struct Frame {
	pub(super) id: String,
	pub(super) flags: FrameFlags,
	pub(super) data: Vec<u8>,
}

impl Frame {
	/// Create a new frame
	///
	/// NOTE: This will accept both `ID3v2.2` and `ID3v2.3/4` frame IDs
	///
	/// # Errors
	///
	/// * `id` is not 3 or 4 bytes
	/// * `id` contains anything other than uppercase letters and digits
	pub fn new(id: &str, data: Vec<u8>, flags: FrameFlags) -> Result<Self> {
		verify_id(id.as_bytes())?;

		Ok(Self {
			id: id.to_string(),
			flags,
			data,
		})
	}

	/// Create a new frame from a [`Content`]
	///
	/// The `encrypted` and `compressed` flags of the content are carried over to the frame.
	///
	/// # Errors
	///
	/// See [`Frame::new`]
	pub fn with_content(id: &str, content: Content) -> Result<Self> {
		let mut flags = FrameFlags::default();
		flags.set_encrypted(content.encrypted);
		flags.set_compressed(content.compressed);

		Self::new(id, content.into_inner(), flags)
	}

	/// The frame identifier
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The size of the payload
	pub fn size(&self) -> usize {
		self.data.len()
	}

	/// Returns the [`FrameFlags`]
	pub fn flags(&self) -> FrameFlags {
		self.flags
	}

	/// Set the frame's flags
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.flags = flags
	}

	/// The raw payload, including any grouping or data length prefix
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Replace the raw payload
	pub fn set_data(&mut self, data: Vec<u8>) {
		self.data = data
	}

	/// Returns the frame's payload as a [`Content`]
	///
	/// The grouping identifier and data length indicator are not part of the content.
	/// For encrypted or compressed frames, the payload is returned as is, the content
	/// will fail to parse anyway.
	pub fn content(&self) -> Content {
		let flags = self.flags;
		let mut data = &*self.data;

		if !flags.encrypted() && !flags.compressed() {
			if flags.grouping() {
				data = data.get(1..).unwrap_or_default();
			}

			if flags.data_length_indicator() {
				data = data.get(4..).unwrap_or_default();
			}
		}

		let mut content = Content::new(data.to_vec());
		content.encrypted = flags.encrypted();
		content.compressed = flags.compressed();
		content
	}

	/// Replace the frame's payload with a [`Content`]
	///
	/// Any grouping identifier or data length indicator is dropped, the encryption
	/// and compression flags are taken from the content.
	pub fn set_content(&mut self, content: Content) {
		self.flags.set_grouping(false);
		self.flags.set_data_length_indicator(false);
		self.flags.set_encrypted(content.encrypted);
		self.flags.set_compressed(content.compressed);
		self.data = content.into_inner();
	}
}

pub(super) fn verify_id(id: &[u8]) -> Result<()> {
	if !(3..=4).contains(&id.len()) {
		return Err(TagError::BadFrameId);
	}

	if !id
		.iter()
		.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
	{
		return Err(TagError::BadFrameId);
	}

	Ok(())
}

const READ_ONLY: u8 = 0x10;
const FILE_ALTER_PRESERVATION: u8 = 0x20;
const TAG_ALTER_PRESERVATION: u8 = 0x40;

const DATA_LENGTH_INDICATOR: u8 = 0x01;
const UNSYNCHRONISATION: u8 = 0x02;
const ENCRYPTION: u8 = 0x04;
const COMPRESSION: u8 = 0x08;
const GROUPING_IDENTITY: u8 = 0x40;

/// The flags of a frame
///
/// These are always stored in the `ID3v2.4` layout, `ID3v2.3` flags are converted
/// when reading and converted back when writing. `ID3v2.2` frames have no flags.
///
/// NOTE: Setting a flag that requires extra bytes (grouping, encryption, compression,
/// data length indicator) does not add those bytes to the frame data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FrameFlags {
	/// The status byte
	pub status: u8,
	/// The format byte
	pub format: u8,
}

macro_rules! flag_accessors {
	($($(#[$meta:meta])* $getter:ident, $setter:ident => $byte:ident & $mask:ident);+ $(;)?) => {
		$(
			$(#[$meta])*
			pub fn $getter(&self) -> bool {
				self.$byte & $mask == $mask
			}

			#[doc = concat!("Set the value returned by [`FrameFlags::", stringify!($getter), "`]")]
			pub fn $setter(&mut self, value: bool) {
				if value {
					self.$byte |= $mask;
				} else {
					self.$byte &= !$mask;
				}
			}
		)+
	};
}

impl FrameFlags {
	flag_accessors! {
		/// Frame cannot be written to
		read_only, set_read_only => status & READ_ONLY;
		/// Discard the frame if the file is altered
		discard_on_file_alter, set_discard_on_file_alter => status & FILE_ALTER_PRESERVATION;
		/// Discard the frame if the tag is altered
		discard_on_tag_alter, set_discard_on_tag_alter => status & TAG_ALTER_PRESERVATION;
		/// The payload starts with a 4 byte syncsafe length of the decoded data
		data_length_indicator, set_data_length_indicator => format & DATA_LENGTH_INDICATOR;
		/// The payload is unsynchronised
		unsynchronised, set_unsynchronised => format & UNSYNCHRONISATION;
		/// The payload is encrypted
		encrypted, set_encrypted => format & ENCRYPTION;
		/// The payload is zlib compressed
		compressed, set_compressed => format & COMPRESSION;
		/// The payload starts with a group identifier byte
		grouping, set_grouping => format & GROUPING_IDENTITY;
	}

	/// Convert `ID3v2.3` flag bytes
	///
	/// `ID3v2.3` compressed frames always carry the decompressed size, so a data length indicator
	/// is assumed for them.
	pub fn from_v3(status: u8, format: u8) -> Self {
		let mut flags = Self {
			status: (status & 0xE0) >> 1,
			format: 0,
		};

		if format & 0x80 == 0x80 {
			flags.format |= COMPRESSION | DATA_LENGTH_INDICATOR;
		}

		if format & 0x40 == 0x40 {
			flags.format |= ENCRYPTION;
		}

		if format & 0x20 == 0x20 {
			flags.format |= GROUPING_IDENTITY;
		}

		flags
	}

	/// Convert to `ID3v2.3` flag bytes
	///
	/// Flags that don't exist in `ID3v2.3` (unsynchronisation and data length indicator) are dropped.
	pub fn as_v3(&self) -> [u8; 2] {
		let status = (self.status & 0x70) << 1;
		let mut format = 0;

		if self.compressed() {
			format |= 0x80;
		}

		if self.encrypted() {
			format |= 0x40;
		}

		if self.grouping() {
			format |= 0x20;
		}

		[status, format]
	}
}

#[cfg(test)]
mod tests {
	use super::{Frame, FrameFlags};
	use crate::content::Content;
	use crate::error::TagError;

	use pretty_assertions::assert_eq;

	#[test]
	fn frame_ids() {
		assert!(Frame::new("TIT2", Vec::new(), FrameFlags::default()).is_ok());
		assert!(Frame::new("TT2", Vec::new(), FrameFlags::default()).is_ok());

		for id in ["TI", "TITLE", "tit2", "TI 2", "T\u{e9}T"] {
			assert!(matches!(
				Frame::new(id, Vec::new(), FrameFlags::default()),
				Err(TagError::BadFrameId)
			));
		}
	}

	#[test]
	fn v3_flag_mapping() {
		// Tag alter, read only, compression, grouping
		let flags = FrameFlags::from_v3(0xA0, 0xA0);

		assert!(flags.discard_on_tag_alter());
		assert!(!flags.discard_on_file_alter());
		assert!(flags.read_only());
		assert!(flags.compressed());
		assert!(flags.data_length_indicator());
		assert!(flags.grouping());
		assert!(!flags.encrypted());

		assert_eq!(flags.as_v3(), [0xA0, 0xA0]);
	}

	#[test]
	fn setters() {
		let mut flags = FrameFlags::default();
		flags.set_encrypted(true);
		flags.set_read_only(true);

		assert_eq!(flags, FrameFlags { status: 0x10, format: 0x04 });

		flags.set_encrypted(false);
		assert_eq!(flags.format, 0);
	}

	#[test]
	fn content_view_skips_prefixes() {
		let mut flags = FrameFlags::default();
		flags.set_grouping(true);
		flags.set_data_length_indicator(true);

		let frame = Frame::new("TIT2", vec![0x80, 0, 0, 0, 4, 0, b'a', b'b', b'c'], flags).unwrap();

		assert_eq!(frame.content(), Content::new(vec![0, b'a', b'b', b'c']));
		assert_eq!(frame.size(), 9);
	}

	#[test]
	fn content_flags() {
		let mut content = Content::new(vec![0, b'a']);
		content.encrypted = true;

		let mut frame = Frame::with_content("TALB", content.clone()).unwrap();
		assert!(frame.flags().encrypted());
		assert_eq!(frame.content(), content);

		frame.set_content(Content::new(vec![3, b'b']));
		assert_eq!(frame.flags(), FrameFlags::default());
		assert_eq!(frame.data(), &[3, b'b']);
	}
}

use super::Id3v2Version;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
/// Flags that apply to the entire tag
pub struct Id3v2TagFlags {
	/// Whether or not the entire frame region is unsynchronised
	///
	/// When writing, this causes the frame region to be unsynchronised, see
	/// [`unsynchronise`](crate::id3::v2::util::unsynch::unsynchronise).
	pub unsynchronisation: bool,
	/// Indicates that the tag has an extended header
	///
	/// Extended headers are skipped when reading and never written.
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	///
	/// A tag with a footer is written without padding.
	pub footer: bool,
}

impl Id3v2TagFlags {
	/// Read the flags byte of a tag header
	///
	/// Bits the version does not define are ignored.
	pub fn from_byte(byte: u8, version: Id3v2Version) -> Self {
		let v3_or_later = version != Id3v2Version::V2;

		Self {
			unsynchronisation: byte & 0x80 == 0x80,
			extended_header: v3_or_later && byte & 0x40 == 0x40,
			experimental: v3_or_later && byte & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && byte & 0x10 == 0x10,
		}
	}

	/// Create the flags byte written to a tag header
	///
	/// The extended header bit is never set.
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if version != Id3v2Version::V2 && self.experimental {
			byte |= 0x20;
		}

		if version == Id3v2Version::V4 && self.footer {
			byte |= 0x10;
		}

		byte
	}
}

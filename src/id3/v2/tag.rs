use super::flags::Id3v2TagFlags;
use super::frame::list::FrameList;
use super::frame::Frame;
use super::Id3v2Version;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::source::TagStore;

#[derive(PartialEq, Eq, Debug, Clone, Default)]
/// An `ID3v2` tag
///
/// Frames are kept in the layout of the version they were read with, nothing is
/// upgraded. Writing a tag uses its own version, so changing the version with
/// [`Id3v2Tag::set_version`] also requires the frame identifiers to be changed to match.
pub struct Id3v2Tag {
	version: Id3v2Version,
	revision: u8,
	flags: Id3v2TagFlags,
	frames: FrameList,
	pub(super) original_size: Option<u64>,
}

impl Id3v2Tag {
	/// Create an empty tag of the given version
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			..Self::default()
		}
	}

	/// The version of the tag
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// Change the version the tag will be written with
	pub fn set_version(&mut self, version: Id3v2Version) {
		self.version = version
	}

	/// The minor revision the tag was read with
	///
	/// Tags are always written with a revision of 0.
	pub fn revision(&self) -> u8 {
		self.revision
	}

	pub(super) fn set_revision(&mut self, revision: u8) {
		self.revision = revision
	}

	/// Returns the [`Id3v2TagFlags`]
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// Set the tag's flags
	pub fn set_flags(&mut self, flags: Id3v2TagFlags) {
		self.flags = flags
	}

	/// The number of bytes the tag occupied when it was read, header and footer included
	///
	/// This is `None` for tags that weren't read from a file.
	pub fn original_size(&self) -> Option<u64> {
		self.original_size
	}

	/// The tag's frames
	pub fn frames(&self) -> &FrameList {
		&self.frames
	}

	/// A mutable reference to the tag's frames
	pub fn frames_mut(&mut self) -> &mut FrameList {
		&mut self.frames
	}
}

impl Id3v2Tag {
	/// Returns an iterator over the tag's frames
	pub fn iter(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// Returns the number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` if the tag contains no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Gets the `pos`th frame with the identifier `id`
	pub fn get(&self, id: &str, pos: usize) -> Option<&Frame> {
		self.frames.get(id, pos)
	}

	/// Appends a frame
	pub fn push(&mut self, frame: Frame) {
		self.frames.push(frame)
	}

	/// Removes the `pos`th frame with the identifier `id`
	pub fn remove(&mut self, id: &str, pos: usize) -> Option<Frame> {
		self.frames.remove(id, pos)
	}
}

impl Id3v2Tag {
	/// Convert the tag to bytes, followed by `padding` zeroed bytes
	///
	/// If the tag has a footer, no padding is written.
	///
	/// # Errors
	///
	/// * A frame identifier doesn't have the length required by the tag's version
	/// * A frame or the tag is too large to be described by its size field
	pub fn dump(&self, padding: u32) -> Result<Vec<u8>> {
		super::write::create_tag(self, padding)
	}

	/// Write the tag to a file, replacing any existing `ID3v2` tag
	///
	/// # Errors
	///
	/// See [`write_id3v2`](crate::id3::v2::write_id3v2)
	pub fn write_to<S>(&self, store: &mut S, options: &WriteOptions) -> Result<()>
	where
		S: TagStore + ?Sized,
	{
		super::write::write_id3v2(store, self, options)
	}
}

impl IntoIterator for Id3v2Tag {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

impl Extend<Frame> for Id3v2Tag {
	fn extend<T: IntoIterator<Item = Frame>>(&mut self, iter: T) {
		self.frames.extend(iter)
	}
}

#[cfg(test)]
mod tests {
	use crate::content::assemble_text;
	use crate::id3::v2::read::parse_id3v2;
	use crate::id3::v2::{read_id3v2_header, Frame, Id3v2Tag, Id3v2TagFlags, Id3v2Version};
	use crate::TextEncoding;

	use pretty_assertions::assert_eq;

	fn tag(version: Id3v2Version, ids: &[&str]) -> Id3v2Tag {
		let mut tag = Id3v2Tag::new(version);

		for (i, id) in ids.iter().enumerate() {
			let content = assemble_text(&format!("value {}", i), TextEncoding::Latin1);
			tag.push(Frame::with_content(id, content).unwrap());
		}

		tag
	}

	fn reread(bytes: &[u8]) -> Id3v2Tag {
		let reader = &mut &bytes[..];
		let header = read_id3v2_header(reader).unwrap();
		parse_id3v2(reader, header).unwrap()
	}

	#[test]
	fn dump_round_trip() {
		for (version, ids) in [
			(Id3v2Version::V2, ["TT2", "TP1", "COM"]),
			(Id3v2Version::V3, ["TIT2", "TPE1", "COMM"]),
			(Id3v2Version::V4, ["TIT2", "TPE1", "COMM"]),
		] {
			let tag = tag(version, &ids);
			let bytes = tag.dump(16).unwrap();

			let read = reread(&bytes);

			assert_eq!(read.version(), version);
			assert_eq!(read.frames(), tag.frames());
		}
	}

	#[test]
	fn v3_frame_flags_round_trip() {
		let mut tag = tag(Id3v2Version::V3, &["TIT2"]);

		let frame = tag.frames_mut().get_mut("TIT2", 0).unwrap();
		let mut flags = frame.flags();
		flags.set_read_only(true);
		flags.set_discard_on_tag_alter(true);
		flags.set_grouping(true);
		frame.set_flags(flags);

		let mut data = vec![7];
		data.extend_from_slice(frame.data());
		frame.set_data(data);

		let bytes = tag.dump(0).unwrap();
		// Status 0b1010_0000, format 0b0010_0000 in the ID3v2.3 layout
		assert_eq!(&bytes[18..20], &[0xA0, 0x20]);

		let read = reread(&bytes);
		assert_eq!(read.get("TIT2", 0).unwrap().flags(), flags);
		assert_eq!(read.frames(), tag.frames());
	}

	#[test]
	fn dump_padding() {
		let tag = tag(Id3v2Version::V4, &["TIT2"]);

		let bytes = tag.dump(100).unwrap();
		let unpadded = tag.dump(0).unwrap();

		assert_eq!(bytes.len(), unpadded.len() + 100);
		assert!(bytes[unpadded.len()..].iter().all(|b| *b == 0));
	}

	#[test]
	fn dump_with_footer() {
		let mut tag = tag(Id3v2Version::V4, &["TIT2"]);
		tag.set_flags(Id3v2TagFlags {
			footer: true,
			..Id3v2TagFlags::default()
		});

		let bytes = tag.dump(100).unwrap();
		let footer = &bytes[bytes.len() - 10..];

		assert_eq!(&footer[..3], b"3DI");
		assert_eq!(&footer[3..], &bytes[3..10]);

		// The footer counts towards the tag size, the padding is dropped
		let header = read_id3v2_header(&mut &bytes[..]).unwrap();
		assert_eq!(header.full_tag_size(), bytes.len() as u64);
	}

	#[test]
	fn mismatched_frame_id() {
		let tag = tag(Id3v2Version::V4, &["TT2"]);

		assert!(matches!(
			tag.dump(0),
			Err(crate::error::TagError::BadFrameId)
		));
	}

	#[test]
	fn duplicates_are_kept() {
		let tag = tag(Id3v2Version::V3, &["COMM", "TIT2", "COMM"]);
		let read = reread(&tag.dump(0).unwrap());

		assert_eq!(read.frames().count("COMM"), 2);
		assert_eq!(read.get("COMM", 1), tag.get("COMM", 1));
	}
}

use super::constants::genre_name;
use crate::error::Result;
use crate::source::TagStore;

/// The 128 byte tag at the end of a file
///
/// Every field is a fixed width block of ISO-8859-1 text, so this only holds a small
/// part of what ID3v2 can. Characters outside of ISO-8859-1 are written as `?`, and
/// values wider than their block are clipped when written, see [`Id3v1Tag::truncate`].
///
/// | Field   | Width            |
/// |---------|------------------|
/// | title   | 30               |
/// | artist  | 30               |
/// | album   | 30               |
/// | year    | 4                |
/// | comment | 30, 28 in v1.1   |
/// | track   | 1 (v1.1 only)    |
/// | genre   | 1                |
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	#[allow(missing_docs)]
	pub title: Option<String>,
	#[allow(missing_docs)]
	pub artist: Option<String>,
	#[allow(missing_docs)]
	pub album: Option<String>,
	/// Not checked to be numeric
	pub year: Option<String>,
	/// Shrinks to 28 bytes whenever a track number is set, since the track number
	/// takes the last byte and the byte before it must stay zero
	pub comment: Option<String>,
	/// Only exists in ID3v1.1 tags
	///
	/// A track number of 0 can't be stored, it would be read back as a plain ID3v1 comment.
	pub track_number: Option<u8>,
	/// An index into [`GENRES`](crate::id3::v1::GENRES)
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Whether every field is unset
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}

	/// The name of the genre, `"Unknown"` if it isn't in the genre table
	pub fn genre_name(&self) -> Option<&'static str> {
		self.genre.map(genre_name)
	}

	/// The number of bytes available to the comment
	pub fn comment_len(&self) -> usize {
		match self.track_number {
			Some(track) if track != 0 => 28,
			_ => 30,
		}
	}

	/// Clip every field to the number of bytes available to it
	pub fn truncate(&mut self) {
		fn clip(field: &mut Option<String>, len: usize) {
			if let Some(value) = field {
				if value.chars().count() > len {
					*value = value.chars().take(len).collect();
				}
			}
		}

		let comment_len = self.comment_len();

		clip(&mut self.title, 30);
		clip(&mut self.artist, 30);
		clip(&mut self.album, 30);
		clip(&mut self.year, 4);
		clip(&mut self.comment, comment_len);
	}

	/// Convert the tag to its 128 byte representation
	///
	/// Fields are clipped the same way as [`Id3v1Tag::truncate`].
	pub fn as_bytes(&self) -> [u8; 128] {
		fn write_field(dest: &mut [u8], value: Option<&str>) {
			if let Some(value) = value {
				for (byte, c) in dest.iter_mut().zip(value.chars()) {
					*byte = u8::try_from(u32::from(c)).unwrap_or(b'?');
				}
			}
		}

		let mut block = [0; 128];
		block[..3].copy_from_slice(b"TAG");

		write_field(&mut block[3..33], self.title.as_deref());
		write_field(&mut block[33..63], self.artist.as_deref());
		write_field(&mut block[63..93], self.album.as_deref());
		write_field(&mut block[93..97], self.year.as_deref());

		match self.track_number {
			Some(track) if track != 0 => {
				write_field(&mut block[97..125], self.comment.as_deref());
				block[126] = track;
			},
			_ => write_field(&mut block[97..127], self.comment.as_deref()),
		}

		block[127] = self.genre.unwrap_or(0xFF);

		block
	}

	/// Write the tag to the end of a store
	///
	/// # Errors
	///
	/// See [`write_id3v1`](crate::id3::v1::write_id3v1)
	pub fn write_to<S>(&self, store: &mut S) -> Result<()>
	where
		S: TagStore + ?Sized,
	{
		super::write::write_id3v1(store, self)
	}
}

//! Format agnostic access to the common fields of both tag types
//!
//! ```no_run
//! use mptag::{read_from_path, write_to_path, Field, Tag, TagType, WriteOptions};
//!
//! # fn main() -> mptag::Result<()> {
//! let options = WriteOptions::default();
//!
//! let mut tags = read_from_path("song.mp3")?;
//! if tags.is_empty() {
//! 	tags.push(Tag::new(TagType::Id3v2, &options));
//! }
//!
//! for tag in &mut tags {
//! 	tag.set_text(Field::Title, "Title", &options)?;
//! 	write_to_path("song.mp3", tag, &options)?;
//! }
//! # Ok(()) }
//! ```

use crate::config::WriteOptions;
use crate::content::{assemble_comment, assemble_text, parse_comment, parse_text, Content};
use crate::error::Result;
use crate::id3::v1::{self, genre_index, genre_name, Id3v1Tag};
use crate::id3::v2::{self, Frame, Id3v2Tag, Id3v2TagFlags, Id3v2Version, TextEncoding};
use crate::id3::{read_id3v1, read_id3v2};
use crate::source::{ByteSource, TagStore};

use std::fs::{File, OpenOptions};
use std::path::Path;

/// The tag types this crate handles
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagType {
	/// A 128 byte tag at the end of the file
	Id3v1,
	/// A variable sized tag at the start of the file
	Id3v2,
}

/// The fields shared by both tag types
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Field {
	Artist,
	Title,
	Album,
	Genre,
	Comment,
	Year,
	Track,
}

impl Field {
	/// The `ID3v2` frame identifier holding this field
	pub fn frame_id(self, version: Id3v2Version) -> &'static str {
		match version {
			Id3v2Version::V2 => match self {
				Field::Artist => "TP1",
				Field::Title => "TT2",
				Field::Album => "TAL",
				Field::Genre => "TCO",
				Field::Comment => "COM",
				Field::Year => "TYE",
				Field::Track => "TRK",
			},
			Id3v2Version::V3 | Id3v2Version::V4 => match self {
				Field::Artist => "TPE1",
				Field::Title => "TIT2",
				Field::Album => "TALB",
				Field::Genre => "TCON",
				Field::Comment => "COMM",
				// ID3v2.4 replaced the year with a recording timestamp
				Field::Year if version == Id3v2Version::V4 => "TDRC",
				Field::Year => "TYER",
				Field::Track => "TRCK",
			},
		}
	}
}

/// Either an [`Id3v1Tag`] or an [`Id3v2Tag`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag {
	#[allow(missing_docs)]
	Id3v1(Id3v1Tag),
	#[allow(missing_docs)]
	Id3v2(Id3v2Tag),
}

impl From<Id3v1Tag> for Tag {
	fn from(input: Id3v1Tag) -> Self {
		Self::Id3v1(input)
	}
}

impl From<Id3v2Tag> for Tag {
	fn from(input: Id3v2Tag) -> Self {
		Self::Id3v2(input)
	}
}

impl Tag {
	/// Create an empty tag
	///
	/// `ID3v2` tags take their version and unsynchronisation flag from `options`.
	pub fn new(tag_type: TagType, options: &WriteOptions) -> Self {
		match tag_type {
			TagType::Id3v1 => Self::Id3v1(Id3v1Tag::default()),
			TagType::Id3v2 => {
				let mut tag = Id3v2Tag::new(options.id3v2_version());
				tag.set_flags(Id3v2TagFlags {
					unsynchronisation: options.unsynchronisation,
					..Id3v2TagFlags::default()
				});

				Self::Id3v2(tag)
			},
		}
	}

	/// Returns the [`TagType`]
	pub fn tag_type(&self) -> TagType {
		match self {
			Tag::Id3v1(_) => TagType::Id3v1,
			Tag::Id3v2(_) => TagType::Id3v2,
		}
	}

	/// Get the content of the `pos`th (0-based) occurrence of a field
	///
	/// `ID3v1` tags only have a single occurrence of each field. Their values are returned as
	/// ISO-8859-1 text content, and comments as comment content with an unknown language.
	pub fn get_content(&self, field: Field, pos: usize) -> Option<Content> {
		match self {
			Tag::Id3v2(tag) => tag
				.get(field.frame_id(tag.version()), pos)
				.map(Frame::content),
			Tag::Id3v1(_) if pos > 0 => None,
			Tag::Id3v1(tag) => {
				let text = match field {
					Field::Artist => tag.artist.clone(),
					Field::Title => tag.title.clone(),
					Field::Album => tag.album.clone(),
					Field::Year => tag.year.clone(),
					Field::Genre => tag.genre.map(|genre| genre_name(genre).to_string()),
					Field::Track => tag.track_number.map(|track| track.to_string()),
					Field::Comment => {
						return tag.comment.as_deref().map(|comment| {
							assemble_comment(comment, None, TextEncoding::Latin1, "")
						})
					},
				};

				text.map(|text| assemble_text(&text, TextEncoding::Latin1))
			},
		}
	}

	/// Set the content of a field
	///
	/// For `ID3v2` tags, the first frame holding the field is replaced, or a new frame is appended.
	///
	/// For `ID3v1` tags, the content is parsed and stored, clipped to the space available. Genres
	/// are matched against the genre table by name, or taken as a numeric index. A track number
	/// may be followed by a total (`"3/12"`), which is dropped.
	///
	/// # Errors
	///
	/// * `ID3v2`: The frame identifier is invalid, see [`Frame::new`]
	/// * `ID3v1`: The content can't be parsed, see [`parse_text`] and [`parse_comment`]
	pub fn set_content(&mut self, field: Field, content: &Content) -> Result<()> {
		match self {
			Tag::Id3v2(tag) => {
				let id = field.frame_id(tag.version());

				match tag.frames_mut().get_mut(id, 0) {
					Some(frame) => frame.set_content(content.clone()),
					None => tag.push(Frame::with_content(id, content.clone())?),
				}
			},
			Tag::Id3v1(tag) => {
				let text = match field {
					Field::Comment => parse_comment(content)?.map(|comment| comment.text),
					_ => Some(parse_text(content)?.text),
				}
				.filter(|text| !text.is_empty());

				match field {
					Field::Artist => tag.artist = text,
					Field::Title => tag.title = text,
					Field::Album => tag.album = text,
					Field::Year => tag.year = text,
					Field::Comment => tag.comment = text,
					Field::Genre => tag.genre = text.and_then(|text| parse_genre(&text)),
					Field::Track => tag.track_number = text.and_then(|text| parse_track(&text)),
				}

				tag.truncate();
			},
		}

		Ok(())
	}

	/// Set a field to a plain string, using the encoding and language from `options`
	///
	/// # Errors
	///
	/// See [`Tag::set_content`]
	pub fn set_text(&mut self, field: Field, text: &str, options: &WriteOptions) -> Result<()> {
		let content = match field {
			Field::Comment => {
				assemble_comment(text, None, options.encoding, &options.default_language)
			},
			_ => assemble_text(text, options.encoding),
		};

		self.set_content(field, &content)
	}
}

fn parse_genre(text: &str) -> Option<u8> {
	let genre = genre_index(text).or_else(|| text.trim().parse::<u8>().ok());

	if genre.is_none() {
		log::warn!("\"{}\" is not an ID3v1 genre, dropping it", text);
	}

	genre
}

fn parse_track(text: &str) -> Option<u8> {
	let track = text.split('/').next().unwrap_or_default().trim();

	match track.parse::<u8>() {
		Ok(0) | Err(_) => {
			log::warn!("\"{}\" is not a valid ID3v1 track number, dropping it", text);
			None
		},
		Ok(track) => Some(track),
	}
}

/// Read every tag from a source, `ID3v2` first
///
/// # Errors
///
/// * An `ID3v2` tag exists, but can't be read, see [`read_id3v2_header`](crate::id3::v2::read_id3v2_header)
/// * Any IO error
pub fn read_from<R>(source: &mut R) -> Result<Vec<Tag>>
where
	R: ByteSource + ?Sized,
{
	let mut tags = Vec::new();

	if let Some(id3v2) = read_id3v2(source)? {
		tags.push(Tag::Id3v2(id3v2));
	}

	if let Some(id3v1) = read_id3v1(source)? {
		tags.push(Tag::Id3v1(id3v1));
	}

	log::debug!("Read {} tag(s)", tags.len());
	Ok(tags)
}

/// Read every tag from a file, `ID3v2` first
///
/// # Errors
///
/// See [`read_from`]
pub fn read_from_path<P>(path: P) -> Result<Vec<Tag>>
where
	P: AsRef<Path>,
{
	read_from(&mut File::open(path)?)
}

/// Write a tag to a store, replacing any existing tag of the same type
///
/// # Errors
///
/// See [`write_id3v1`](crate::id3::v1::write_id3v1) and [`write_id3v2`](crate::id3::v2::write_id3v2)
pub fn write_to<S>(store: &mut S, tag: &Tag, options: &WriteOptions) -> Result<()>
where
	S: TagStore + ?Sized,
{
	match tag {
		Tag::Id3v1(tag) => v1::write_id3v1(store, tag),
		Tag::Id3v2(tag) => v2::write_id3v2(store, tag, options),
	}
}

/// Write a tag to a file, replacing any existing tag of the same type
///
/// # Errors
///
/// See [`write_to`]
pub fn write_to_path<P>(path: P, tag: &Tag, options: &WriteOptions) -> Result<()>
where
	P: AsRef<Path>,
{
	let mut file = OpenOptions::new().read(true).write(true).open(path)?;
	write_to(&mut file, tag, options)
}

/// Remove a tag from a store
///
/// Returns `false` if there was no tag of that type.
///
/// # Errors
///
/// See [`remove_id3v1`](crate::id3::v1::remove_id3v1) and [`remove_id3v2`](crate::id3::v2::remove_id3v2)
pub fn remove_from<S>(store: &mut S, tag_type: TagType) -> Result<bool>
where
	S: TagStore + ?Sized,
{
	match tag_type {
		TagType::Id3v1 => v1::remove_id3v1(store),
		TagType::Id3v2 => v2::remove_id3v2(store),
	}
}

/// Remove a tag from a file
///
/// # Errors
///
/// See [`remove_from`]
pub fn remove_from_path<P>(path: P, tag_type: TagType) -> Result<bool>
where
	P: AsRef<Path>,
{
	let mut file = OpenOptions::new().read(true).write(true).open(path)?;
	remove_from(&mut file, tag_type)
}

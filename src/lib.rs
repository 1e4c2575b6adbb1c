//! [![Crate](https://img.shields.io/crates/v/mptag.svg)](https://crates.io/crates/mptag)
//!
//! Read, write and remove the ID3 tags of MPEG audio files.
//!
//! # Supported Tags
//!
//! | Tag    | Versions           | Location                     |
//! |--------|--------------------|------------------------------|
//! | ID3v1  | 1.0, 1.1           | The last 128 bytes of a file |
//! | ID3v2  | 2.2, 2.3, 2.4      | The start of a file          |
//!
//! # Examples
//!
//! ## Reading a single field
//!
//! ```no_run
//! use mptag::content::parse_text;
//! use mptag::{read_from_path, Field};
//!
//! # fn main() -> mptag::Result<()> {
//! for tag in read_from_path("song.mp3")? {
//! 	if let Some(content) = tag.get_content(Field::Title, 0) {
//! 		println!("{:?}: {}", tag.tag_type(), parse_text(&content)?.text);
//! 	}
//! }
//! # Ok(()) }
//! ```
//!
//! ## Working with frames directly
//!
//! ```no_run
//! use mptag::content::assemble_comment;
//! use mptag::id3::v2::{Frame, Id3v2Tag, Id3v2Version};
//! use mptag::{TextEncoding, WriteOptions};
//! use std::fs::OpenOptions;
//!
//! # fn main() -> mptag::Result<()> {
//! let mut tag = Id3v2Tag::new(Id3v2Version::V3);
//! tag.push(Frame::with_content(
//! 	"COMM",
//! 	assemble_comment("Recorded live", None, TextEncoding::Latin1, "eng"),
//! )?);
//!
//! let mut file = OpenOptions::new().read(true).write(true).open("song.mp3")?;
//! tag.write_to(&mut file, &WriteOptions::default())?;
//! # Ok(()) }
//! ```
//!
//! # Notes
//!
//! Writing an `ID3v2` tag rewrites it in place whenever it fits into the space of the existing tag.
//! Otherwise the audio data is moved, and padding is added from [`WriteOptions::padding`].
//!
//! Encrypted and compressed frames are kept as they are, but their content is never decoded.

#![deny(clippy::pedantic, clippy::all)]
#![warn(missing_docs)]
#![allow(
	clippy::too_many_lines,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::cast_possible_wrap,
	clippy::cast_possible_truncation,
	clippy::module_name_repetitions,
	clippy::must_use_candidate,
	clippy::doc_markdown,
	clippy::match_wildcard_for_single_variants,
	clippy::semicolon_if_nothing_returned
)]

pub mod config;
pub mod content;
mod error;
pub mod id3;
pub mod mpeg;
pub mod source;
mod tag;

pub use crate::config::WriteOptions;
pub use crate::error::{Result, TagError};
pub use crate::id3::v2::TextEncoding;
pub use crate::tag::{
	read_from, read_from_path, remove_from, remove_from_path, write_to, write_to_path, Field, Tag,
	TagType,
};

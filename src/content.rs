//! Text and comment frame payloads
//!
//! Every simple text field (title, artist, album, year, genre, track) shares one payload
//! layout, only the frame identifier tells them apart:
//!
//! ```text
//! encoding (1) | text
//! ```
//!
//! Comment payloads carry a language and an optional short description:
//!
//! ```text
//! encoding (1) | language (3) | description | terminator | text
//! ```
//!
//! Text is never terminated on disk, a terminator is only present after the description.
//!
//! # Examples
//!
//! ```
//! use mptag::content::{assemble_comment, parse_comment};
//! use mptag::TextEncoding;
//!
//! let content = assemble_comment("Hi", None, TextEncoding::Latin1, "eng");
//! assert_eq!(content.data(), &[0x00, b'e', b'n', b'g', 0x00, b'H', b'i']);
//!
//! let comment = parse_comment(&content).unwrap().unwrap();
//! assert_eq!(&comment.language, b"eng");
//! assert_eq!(comment.description, None);
//! assert_eq!(comment.text, "Hi");
//! ```

use crate::error::{Result, TagError};
use crate::id3::v2::util::text_utils::{decode_text, encode_text, find_terminator, TextEncoding};

/// The language written when none (or an invalid one) is given
pub const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

/// A raw frame payload
///
/// This is what the parse functions consume and the assemble functions produce. The
/// `encrypted` and `compressed` flags mirror the flags of the frame the payload came from.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Content {
	data: Vec<u8>,
	/// The payload belongs to an encrypted frame
	pub encrypted: bool,
	/// The payload belongs to a compressed frame
	pub compressed: bool,
}

impl Content {
	/// Create an unencrypted, uncompressed payload
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			data,
			encrypted: false,
			compressed: false,
		}
	}

	/// The payload bytes
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// The payload length
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the payload is empty
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Consume the content, returning the payload bytes
	pub fn into_inner(self) -> Vec<u8> {
		self.data
	}
}

impl From<Vec<u8>> for Content {
	fn from(data: Vec<u8>) -> Self {
		Self::new(data)
	}
}

/// A parsed text payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextContent {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub text: String,
}

/// A parsed comment payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentContent {
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Short content description, `None` if it was empty
	pub description: Option<String>,
	/// The comment text
	pub text: String,
}

// The frame flags decide before the payload is looked at
fn verify_content(content: &Content) -> Result<()> {
	if content.encrypted {
		return Err(TagError::UnsupportedEncryption);
	}

	if content.compressed {
		return Err(TagError::UnsupportedCompression);
	}

	if content.is_empty() {
		return Err(TagError::InvalidInput);
	}

	Ok(())
}

/// Parse a text payload
///
/// An unknown encoding byte is treated as [`TextEncoding::Latin1`].
///
/// # Errors
///
/// * [`TagError::UnsupportedEncryption`] - The payload is encrypted
/// * [`TagError::UnsupportedCompression`] - The payload is compressed
/// * [`TagError::InvalidInput`] - The payload is empty
pub fn parse_text(content: &Content) -> Result<TextContent> {
	verify_content(content)?;

	let encoding = TextEncoding::from_u8_lossy(content.data[0]);
	let text = decode_text(&content.data[1..], encoding);

	Ok(TextContent { encoding, text })
}

/// Parse a comment payload
///
/// Returns `None` if no comment text follows the description, rather than an empty comment.
///
/// # Errors
///
/// See [`parse_text`]
pub fn parse_comment(content: &Content) -> Result<Option<CommentContent>> {
	verify_content(content)?;

	let data = content.data();
	let encoding = TextEncoding::from_u8_lossy(data[0]);

	if data.len() < 4 {
		log::trace!("Comment payload is too short to hold a language");
		return Ok(None);
	}

	let language = [data[1], data[2], data[3]];
	let rest = &data[4..];

	let (description_len, _) = find_terminator(rest, encoding);
	let consumed = description_len + encoding.terminator_len();

	if rest.len() <= consumed {
		return Ok(None);
	}

	// A description holding nothing but a byte order mark is still absent
	let description = Some(decode_text(&rest[..description_len], encoding))
		.filter(|description| !description.is_empty());
	let text = decode_text(&rest[consumed..], encoding);

	Ok(Some(CommentContent {
		encoding,
		language,
		description,
		text,
	}))
}

/// Create a text payload
pub fn assemble_text(text: &str, encoding: TextEncoding) -> Content {
	let mut data = vec![encoding as u8];
	data.extend(encode_text(text, encoding, false));

	Content::new(data)
}

/// Create a comment payload
///
/// A `language` that is not exactly 3 bytes is written as `"XXX"`.
/// An absent or empty description is written as a lone terminator, without a byte order mark.
pub fn assemble_comment(
	text: &str,
	description: Option<&str>,
	encoding: TextEncoding,
	language: &str,
) -> Content {
	let language: &[u8] = if language.len() == 3 {
		language.as_bytes()
	} else {
		&UNKNOWN_LANGUAGE
	};

	let description = match description.filter(|description| !description.is_empty()) {
		Some(description) => encode_text(description, encoding, true),
		None => vec![0; encoding.terminator_len()],
	};
	let text = encode_text(text, encoding, false);

	let mut data = Vec::with_capacity(4 + description.len() + text.len());
	data.push(encoding as u8);
	data.extend_from_slice(language);
	data.extend(description);
	data.extend(text);

	Content::new(data)
}

impl TextContent {
	/// Convert back into a payload
	pub fn assemble(&self) -> Content {
		assemble_text(&self.text, self.encoding)
	}
}

impl CommentContent {
	/// Convert back into a payload
	pub fn assemble(&self) -> Content {
		let mut content = assemble_comment(
			&self.text,
			self.description.as_deref(),
			self.encoding,
			"",
		);

		content.data[1..4].copy_from_slice(&self.language);
		content
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	#[test]
	fn comment_layout() {
		let content = assemble_comment("Hi", Some(""), TextEncoding::Latin1, "eng");

		assert_eq!(
			content.data(),
			&[0x00, b'e', b'n', b'g', 0x00, b'H', b'i']
		);
		assert_eq!(
			content,
			assemble_comment("Hi", None, TextEncoding::Latin1, "eng")
		);

		assert_eq!(
			parse_comment(&content).unwrap(),
			Some(CommentContent {
				encoding: TextEncoding::Latin1,
				language: *b"eng",
				description: None,
				text: String::from("Hi"),
			})
		);
	}

	#[test]
	fn comment_with_description() {
		let content = assemble_comment("Body", Some("Descr"), TextEncoding::UTF8, "deu");

		assert_eq!(content.data(), b"\x03deuDescr\0Body");

		let comment = parse_comment(&content).unwrap().unwrap();
		assert_eq!(comment.description.as_deref(), Some("Descr"));
		assert_eq!(comment.text, "Body");
	}

	#[test]
	fn comment_bad_language() {
		for language in ["", "en", "engl"] {
			let content = assemble_comment("Hi", None, TextEncoding::Latin1, language);
			assert_eq!(&content.data()[1..4], b"XXX");
		}
	}

	#[test]
	fn comment_without_text() {
		// Only a description, the computed text length is 0
		let content = Content::new(b"\x00engDescr\0".to_vec());
		assert_eq!(parse_comment(&content).unwrap(), None);

		// Unterminated description
		let content = Content::new(b"\x00engDescr".to_vec());
		assert_eq!(parse_comment(&content).unwrap(), None);

		// Shorter than the fixed fields
		let content = Content::new(vec![0x00, b'e']);
		assert_eq!(parse_comment(&content).unwrap(), None);

		let content = assemble_comment("", None, TextEncoding::Latin1, "eng");
		assert_eq!(parse_comment(&content).unwrap(), None);
	}

	#[test]
	fn comment_utf16() {
		let content = assemble_comment("Text", Some("D"), TextEncoding::UTF16, "eng");

		assert_eq!(
			&content.data()[4..],
			&[0xFE, 0xFF, 0x00, b'D', 0x00, 0x00, 0xFE, 0xFF, 0x00, b'T', 0x00, b'e', 0x00, b'x', 0x00, b't']
		);

		let comment = parse_comment(&content).unwrap().unwrap();
		assert_eq!(comment.description.as_deref(), Some("D"));
		assert_eq!(comment.text, "Text");
		assert_eq!(comment.assemble(), content);
	}

	#[test]
	fn absent_utf16_description() {
		for description in [None, Some("")] {
			let content = assemble_comment("Hi", description, TextEncoding::UTF16, "eng");

			assert_eq!(
				content.data(),
				&[0x01, b'e', b'n', b'g', 0x00, 0x00, 0xFE, 0xFF, 0x00, b'H', 0x00, b'i']
			);

			let comment = parse_comment(&content).unwrap().unwrap();
			assert_eq!(comment.description, None);
			assert_eq!(comment.text, "Hi");
		}

		// Written by other taggers: a description made of only a byte order mark
		let content = Content::new(vec![
			0x01, b'e', b'n', b'g', 0xFE, 0xFF, 0x00, 0x00, 0xFE, 0xFF, 0x00, b'H', 0x00, b'i',
		]);
		let comment = parse_comment(&content).unwrap().unwrap();
		assert_eq!(comment.description, None);
		assert_eq!(comment.text, "Hi");
	}

	#[test]
	fn invalid_encoding_is_latin1() {
		let content = Content::new(vec![7, b'a', b'b']);
		let text = parse_text(&content).unwrap();

		assert_eq!(text.encoding, TextEncoding::Latin1);
		assert_eq!(text.text, "ab");
	}

	#[test]
	fn text_of_single_byte_payload() {
		let text = parse_text(&Content::new(vec![3])).unwrap();

		assert_eq!(text.encoding, TextEncoding::UTF8);
		assert_eq!(text.text, "");
	}

	#[test]
	fn rejected_payloads() {
		assert!(matches!(
			parse_text(&Content::default()),
			Err(TagError::InvalidInput)
		));
		assert!(matches!(
			parse_comment(&Content::default()),
			Err(TagError::InvalidInput)
		));

		let mut encrypted = assemble_text("foo", TextEncoding::Latin1);
		encrypted.encrypted = true;

		assert!(matches!(
			parse_text(&encrypted),
			Err(TagError::UnsupportedEncryption)
		));
		assert!(matches!(
			parse_comment(&encrypted),
			Err(TagError::UnsupportedEncryption)
		));

		// The flags are checked before the payload
		let mut empty = Content::default();
		empty.compressed = true;
		assert!(matches!(
			parse_text(&empty),
			Err(TagError::UnsupportedCompression)
		));
		empty.encrypted = true;
		assert!(matches!(
			parse_comment(&empty),
			Err(TagError::UnsupportedEncryption)
		));

		let mut compressed = assemble_comment("foo", None, TextEncoding::Latin1, "eng");
		compressed.compressed = true;

		assert!(matches!(
			parse_text(&compressed),
			Err(TagError::UnsupportedCompression)
		));
		assert!(matches!(
			parse_comment(&compressed),
			Err(TagError::UnsupportedCompression)
		));
	}

	fn encoding() -> impl Strategy<Value = TextEncoding> {
		prop_oneof![
			Just(TextEncoding::Latin1),
			Just(TextEncoding::UTF16),
			Just(TextEncoding::UTF16BE),
			Just(TextEncoding::UTF8),
		]
	}

	proptest! {
		#[test]
		fn text_round_trip(text in "[ -~]{0,64}", encoding in encoding()) {
			let parsed = parse_text(&assemble_text(&text, encoding)).unwrap();

			prop_assert_eq!(parsed, TextContent { encoding, text });
		}

		#[test]
		fn comment_round_trip(
			text in "[ -~]{1,64}",
			description in proptest::option::of("[ -~]{1,16}"),
			encoding in encoding(),
		) {
			let content = assemble_comment(&text, description.as_deref(), encoding, "eng");
			let parsed = parse_comment(&content).unwrap().unwrap();

			prop_assert_eq!(parsed.language, *b"eng");
			prop_assert_eq!(parsed.description, description);
			prop_assert_eq!(parsed.text, text);
		}

		#[test]
		fn encrypted_always_rejected(data in proptest::collection::vec(any::<u8>(), 0..64)) {
			let mut content = Content::new(data);
			content.encrypted = true;

			prop_assert!(matches!(parse_text(&content), Err(TagError::UnsupportedEncryption)));
			prop_assert!(matches!(parse_comment(&content), Err(TagError::UnsupportedEncryption)));
		}
	}
}

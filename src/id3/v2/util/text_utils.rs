use serde::{Deserialize, Serialize};

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a TextEncoding from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// Get a TextEncoding from a u8, falling back to [`TextEncoding::Latin1`] for unknown values
	pub fn from_u8_lossy(byte: u8) -> Self {
		Self::from_u8(byte).unwrap_or_else(|| {
			log::trace!("Unknown text encoding {}, assuming ISO-8859-1", byte);
			Self::Latin1
		})
	}

	/// The width of a string terminator in this encoding
	pub fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

/// Finds the end of a terminated string
///
/// Returns the length of the string and whether a terminator was found. UTF-16
/// terminators are only matched on 2-byte boundaries.
pub(crate) fn find_terminator(content: &[u8], encoding: TextEncoding) -> (usize, bool) {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => match content.iter().position(|b| *b == 0) {
			Some(pos) => (pos, true),
			None => (content.len(), false),
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			match content.chunks_exact(2).position(|c| c == [0, 0]) {
				Some(pos) => (pos * 2, true),
				None => (content.len(), false),
			}
		},
	}
}

/// Decodes a string, stopping at the first terminator
///
/// This never fails. Invalid sequences are replaced, a dangling UTF-16 byte is dropped,
/// and UTF-16 without a byte order mark is read as big endian.
pub(crate) fn decode_text(content: &[u8], encoding: TextEncoding) -> String {
	let (len, _) = find_terminator(content, encoding);
	let raw = &content[..len];

	match encoding {
		TextEncoding::Latin1 => raw.iter().map(|c| char::from(*c)).collect::<String>(),
		TextEncoding::UTF16 => match raw {
			[0xFE, 0xFF, rest @ ..] => utf16_decode(rest, u16::from_be_bytes),
			[0xFF, 0xFE, rest @ ..] => utf16_decode(rest, u16::from_le_bytes),
			_ => utf16_decode(raw, u16::from_be_bytes),
		},
		TextEncoding::UTF16BE => utf16_decode(raw, u16::from_be_bytes),
		TextEncoding::UTF8 => String::from_utf8_lossy(raw).into_owned(),
	}
}

pub(crate) fn utf16_decode(reader: &[u8], endianness: fn([u8; 2]) -> u16) -> String {
	let units = reader
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect::<Vec<u16>>();

	String::from_utf16_lossy(&units)
}

/// Encodes a string, optionally appending a terminator
///
/// Characters that cannot be represented in ISO-8859-1 are written as `?`.
pub(crate) fn encode_text(text: &str, text_encoding: TextEncoding, terminated: bool) -> Vec<u8> {
	let mut out = match text_encoding {
		TextEncoding::Latin1 => text
			.chars()
			.map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
			.collect::<Vec<u8>>(),
		TextEncoding::UTF16 => utf16_encode(text, u16::to_be_bytes, true),
		TextEncoding::UTF16BE => utf16_encode(text, u16::to_be_bytes, false),
		TextEncoding::UTF8 => text.as_bytes().to_vec(),
	};

	if terminated {
		out.extend(std::iter::repeat(0).take(text_encoding.terminator_len()));
	}

	out
}

fn utf16_encode(text: &str, endianness: fn(u16) -> [u8; 2], bom: bool) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		match endianness(1) {
			[0, 1] => encoded.extend_from_slice(&[0xFE, 0xFF]),
			_ => encoded.extend_from_slice(&[0xFF, 0xFE]),
		}
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	encoded
}

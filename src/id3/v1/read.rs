use super::tag::Id3v1Tag;

/// Parse a 128 byte ID3v1 block
///
/// The block is expected to start with "TAG", this isn't checked again.
pub fn parse_id3v1(reader: [u8; 128]) -> Id3v1Tag {
	let mut tag = Id3v1Tag {
		title: decode_text(&reader[3..33]),
		artist: decode_text(&reader[33..63]),
		album: decode_text(&reader[63..93]),
		year: decode_text(&reader[93..97]),
		comment: None,
		track_number: None,
		genre: None,
	};

	// ID3v1.1 uses the last 2 bytes of the comment for a zero byte and the track number
	let range = if reader[125] == 0 && reader[126] != 0 {
		tag.track_number = Some(reader[126]);

		97_usize..125
	} else {
		97..127
	};

	tag.comment = decode_text(&reader[range]);

	if reader[127] != 0xFF {
		tag.genre = Some(reader[127]);
	}

	tag
}

// Fields are NUL padded, though some writers pad with spaces instead
fn decode_text(data: &[u8]) -> Option<String> {
	let end = data.iter().position(|c| *c == 0).unwrap_or(data.len());

	let read = data[..end]
		.iter()
		.map(|c| char::from(*c))
		.collect::<String>();
	let read = read.trim_end_matches(' ');

	if read.is_empty() {
		None
	} else {
		Some(read.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::parse_id3v1;

	use pretty_assertions::assert_eq;

	fn block() -> [u8; 128] {
		let mut block = [0; 128];
		block[..3].copy_from_slice(b"TAG");
		block[3..8].copy_from_slice(b"Title");
		block[33..39].copy_from_slice(b"Artist");
		block[63..93].copy_from_slice(&[b' '; 30]);
		block[93..97].copy_from_slice(b"2002");
		block[97..104].copy_from_slice(b"Comment");
		block[127] = 0xFF;
		block
	}

	#[test]
	fn fields() {
		let tag = parse_id3v1(block());

		assert_eq!(tag.title.as_deref(), Some("Title"));
		assert_eq!(tag.artist.as_deref(), Some("Artist"));
		assert_eq!(tag.album, None);
		assert_eq!(tag.year.as_deref(), Some("2002"));
		assert_eq!(tag.comment.as_deref(), Some("Comment"));
		assert_eq!(tag.track_number, None);
		assert_eq!(tag.genre, None);
	}

	#[test]
	fn v1_1_track() {
		let mut block = block();
		block[126] = 7;
		block[127] = 17;

		let tag = parse_id3v1(block);

		assert_eq!(tag.track_number, Some(7));
		assert_eq!(tag.genre, Some(17));
	}

	#[test]
	fn v1_full_comment() {
		let mut block = block();
		block[97..127].copy_from_slice(&[b'c'; 30]);

		let tag = parse_id3v1(block);

		assert_eq!(tag.comment.as_deref().map(str::len), Some(30));
		assert_eq!(tag.track_number, None);
	}

	#[test]
	fn latin1() {
		let mut block = block();
		block[3..8].copy_from_slice(&[b'l', 0xF8, b'f', b't', 0xA5]);

		assert_eq!(parse_id3v1(block).title.as_deref(), Some("l\u{f8}ft\u{a5}"));
	}
}

/// Errors that could occur within mptag.
#[derive(thiserror::Error, Debug)]
pub enum TagError {
	// Content codec errors
	/// The content or its payload is missing
	#[error("Content contains no data")]
	InvalidInput,
	/// The frame is encrypted, which is never decoded
	#[error("Encrypted frames are not supported")]
	UnsupportedEncryption,
	/// The frame is compressed, which is never decoded
	#[error("Compressed frames are not supported")]
	UnsupportedCompression,

	// Tag data related errors
	/// Fewer bytes were available than the tag layout requires
	#[error("Truncated: {0}")]
	Truncated(&'static str),
	/// The tag layout is malformed
	#[error("Corrupt: {0}")]
	Corrupt(&'static str),
	/// Arises when an ID3v2 tag has an unknown major version
	#[error("ID3v2: Found an invalid version (v{0}.{1}), expected any major revision in: (2, 3, 4)")]
	BadId3v2Version(u8, u8),
	/// A frame identifier is not 3 or 4 uppercase ASCII letters or digits, or does not fit the tag version
	#[error("ID3v2: Encountered a bad frame ID")]
	BadFrameId,
	/// Attempting to write an abnormally large amount of data
	#[error("An abnormally large amount of data was provided, and an overflow occurred")]
	TooMuchData,
	/// The store does not contain the tag the operation expects
	#[error("No tag of the requested type is present")]
	NoTag,

	/// Represents all cases of `std::io::Error`.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Result of tag operations.
pub type Result<T> = std::result::Result<T, TagError>;

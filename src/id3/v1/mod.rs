//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! See also: [Id3v1Tag]
//!
//! ## Genres
//!
//! ID3v1 stores the genre in a single byte, which is an index into the [`GENRES`] table.
//! A byte of 255 means no genre, anything else outside of the table is reported as `"Unknown"`
//! by [`genre_name`].
//!
//! ## Track Numbers
//!
//! ID3v1.1 stores the track number in a non-zero byte at the end of the comment field.
//! A track number of 0 will be treated as an empty field.
//! Additionally, there is no track total field.
pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use constants::{genre_index, genre_name, GENRES};
pub use read::parse_id3v1;
pub use tag::Id3v1Tag;
pub use write::{remove_id3v1, write_id3v1};

/// The size of an ID3v1 tag
pub const ID3V1_TAG_SIZE: u64 = 128;

//! Byte sources and stores
//!
//! Every reader in this crate works over a [`ByteSource`], which is anything
//! implementing [`Read`] and [`Seek`]. That makes [`File`] the file-backed
//! source and [`Cursor`] the memory-backed one, so the same parsing code runs
//! over an open file or an already buffered prefix of one.
//!
//! Writers additionally need to grow and shrink the data, see [`TagStore`].

use crate::error::{Result, TagError};

use std::fs::File;
use std::io::{Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

/// Size of the buffer used when moving data around inside a store
const SHIFT_CHUNK_SIZE: u64 = 64 * 1024;

/// Read and seek access to tag data
pub trait ByteSource: Read + Seek {
	/// Read as many bytes as are available into `dest`
	///
	/// Fewer bytes than `dest.len()` are only returned once the end of the data is reached.
	///
	/// # Errors
	///
	/// Any error from the underlying reader, other than [`ErrorKind::Interrupted`]
	fn read_up_to(&mut self, dest: &mut [u8]) -> Result<usize> {
		let mut filled = 0;

		while filled < dest.len() {
			match self.read(&mut dest[filled..]) {
				Ok(0) => break,
				Ok(n) => filled += n,
				Err(e) if e.kind() == ErrorKind::Interrupted => {},
				Err(e) => return Err(e.into()),
			}
		}

		Ok(filled)
	}

	/// The total length of the data
	///
	/// The current position is restored afterwards.
	///
	/// # Errors
	///
	/// Any error from seeking
	fn total_len(&mut self) -> Result<u64> {
		let current = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		if current != len {
			self.seek(SeekFrom::Start(current))?;
		}

		Ok(len)
	}
}

impl<T> ByteSource for T where T: Read + Seek + ?Sized {}

/// Shrinking or growing a store to an exact length
pub trait Truncate {
	/// Set the length of the data to `new_len`
	///
	/// Growing fills the new space with zeros.
	///
	/// # Errors
	///
	/// Any error from the underlying store
	fn truncate(&mut self, new_len: u64) -> Result<()>;
}

impl Truncate for File {
	fn truncate(&mut self, new_len: u64) -> Result<()> {
		self.set_len(new_len).map_err(Into::into)
	}
}

impl Truncate for Cursor<Vec<u8>> {
	fn truncate(&mut self, new_len: u64) -> Result<()> {
		let new_len = usize::try_from(new_len).map_err(|_| TagError::TooMuchData)?;
		self.get_mut().resize(new_len, 0);

		Ok(())
	}
}

impl Truncate for Cursor<&mut Vec<u8>> {
	fn truncate(&mut self, new_len: u64) -> Result<()> {
		let new_len = usize::try_from(new_len).map_err(|_| TagError::TooMuchData)?;
		self.get_mut().resize(new_len, 0);

		Ok(())
	}
}

impl<T> Truncate for &mut T
where
	T: Truncate + ?Sized,
{
	fn truncate(&mut self, new_len: u64) -> Result<()> {
		(**self).truncate(new_len)
	}
}

/// A [`ByteSource`] that can also be written to and resized
///
/// This is implemented for [`File`] and for `Cursor`s over a `Vec<u8>`.
pub trait TagStore: ByteSource + Write + Truncate {}

impl<T> TagStore for T where T: ByteSource + Write + Truncate + ?Sized {}

/// Move everything from offset `from` to the end of the store so it starts at `to`
///
/// The store grows or shrinks by the difference, and the moved bytes are preserved exactly.
/// Any bytes in `to..from` (when shrinking) are discarded, and the gap left in `from..to`
/// (when growing) keeps its old contents, the caller is expected to overwrite it.
///
/// Returns the new length of the store.
///
/// NOTE: This is not transactional. An IO error partway through leaves the store half shifted.
///
/// # Errors
///
/// * `from` is past the end of the store
/// * Any IO error
pub fn shift_tail<S>(store: &mut S, from: u64, to: u64) -> Result<u64>
where
	S: TagStore + ?Sized,
{
	let end = store.total_len()?;

	if from > end {
		return Err(TagError::Truncated(
			"Attempted to shift data starting past the end of the store",
		));
	}

	let tail_len = end - from;
	let new_len = to + tail_len;

	if from == to {
		return Ok(new_len);
	}

	log::debug!(
		"Shifting {} bytes from offset {} to offset {}",
		tail_len,
		from,
		to
	);

	let mut buf = vec![0; SHIFT_CHUNK_SIZE.min(tail_len) as usize];

	if to < from {
		// Moving towards the start, copy front to back so nothing unread is overwritten
		let mut copied = 0;

		while copied < tail_len {
			let n = SHIFT_CHUNK_SIZE.min(tail_len - copied) as usize;

			store.seek(SeekFrom::Start(from + copied))?;
			store.read_exact(&mut buf[..n])?;
			store.seek(SeekFrom::Start(to + copied))?;
			store.write_all(&buf[..n])?;

			copied += n as u64;
		}

		store.truncate(new_len)?;
	} else {
		// Moving towards the end, copy back to front
		let mut remaining = tail_len;

		while remaining > 0 {
			let n = SHIFT_CHUNK_SIZE.min(remaining);
			remaining -= n;

			store.seek(SeekFrom::Start(from + remaining))?;
			store.read_exact(&mut buf[..n as usize])?;
			store.seek(SeekFrom::Start(to + remaining))?;
			store.write_all(&buf[..n as usize])?;
		}

		if tail_len == 0 {
			store.truncate(new_len)?;
		}
	}

	store.flush()?;

	Ok(new_len)
}

#[cfg(test)]
mod tests {
	use super::{shift_tail, ByteSource};

	use std::io::{Cursor, Seek, SeekFrom};

	use pretty_assertions::assert_eq;

	#[test]
	fn short_read_only_at_end() {
		let mut source = Cursor::new(vec![1_u8, 2, 3, 4, 5]);
		source.seek(SeekFrom::Start(3)).unwrap();

		let mut dest = [0; 4];
		assert_eq!(source.read_up_to(&mut dest).unwrap(), 2);
		assert_eq!(&dest[..2], &[4, 5]);

		assert_eq!(source.read_up_to(&mut dest).unwrap(), 0);
	}

	#[test]
	fn total_len_restores_position() {
		let mut source = Cursor::new(vec![0_u8; 42]);
		source.seek(SeekFrom::Start(7)).unwrap();

		assert_eq!(source.total_len().unwrap(), 42);
		assert_eq!(source.position(), 7);
	}

	#[test]
	fn shift_towards_start() {
		let mut store = Cursor::new(b"HEADERaudio bytes".to_vec());

		let new_len = shift_tail(&mut store, 6, 2).unwrap();

		assert_eq!(new_len, 13);
		assert_eq!(store.get_ref().as_slice(), b"HEaudio bytes");
	}

	#[test]
	fn shift_towards_end() {
		let mut store = Cursor::new(b"HDaudio".to_vec());

		let new_len = shift_tail(&mut store, 2, 5).unwrap();

		assert_eq!(new_len, 10);
		// The gap keeps whatever was there before, the caller overwrites it
		assert_eq!(store.get_ref().as_slice(), b"HDaudaudio");
	}

	#[test]
	fn shift_large_tail() {
		let tail = (0..200_000_u32).map(|i| (i % 251) as u8).collect::<Vec<u8>>();

		let mut data = vec![0xAA; 10];
		data.extend_from_slice(&tail);

		let mut store = Cursor::new(data);

		shift_tail(&mut store, 10, 70_000).unwrap();
		assert_eq!(&store.get_ref()[70_000..], tail.as_slice());

		shift_tail(&mut store, 70_000, 0).unwrap();
		assert_eq!(store.get_ref().as_slice(), tail.as_slice());
	}

	#[test]
	fn shift_past_end() {
		let mut store = Cursor::new(vec![0_u8; 4]);

		assert!(shift_tail(&mut store, 5, 0).is_err());
	}
}

use super::Frame;

/// An ordered list of [`Frame`]s
///
/// Insertion order is kept and written out as is. Identifiers may repeat, frames
/// sharing an identifier are told apart by their position among each other.
///
/// ```
/// use mptag::id3::v2::{Frame, FrameFlags, FrameList};
///
/// # fn main() -> mptag::Result<()> {
/// let mut frames = FrameList::default();
/// frames.push(Frame::new("COMM", b"\x00engfirst".to_vec(), FrameFlags::default())?);
/// frames.push(Frame::new("TIT2", b"\x00Title".to_vec(), FrameFlags::default())?);
/// frames.push(Frame::new("COMM", b"\x00engsecond".to_vec(), FrameFlags::default())?);
///
/// assert_eq!(frames.count("COMM"), 2);
/// assert_eq!(frames.get("COMM", 1).map(Frame::data), Some(&b"\x00engsecond"[..]));
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct FrameList {
	frames: Vec<Frame>,
}

impl FrameList {
	/// Append a frame
	pub fn push(&mut self, frame: Frame) {
		self.frames.push(frame)
	}

	/// Insert a frame at `index`, shifting all frames after it
	///
	/// An `index` past the end appends the frame.
	pub fn insert(&mut self, index: usize, frame: Frame) {
		let index = index.min(self.frames.len());
		self.frames.insert(index, frame)
	}

	fn position(&self, id: &str, pos: usize) -> Option<usize> {
		self.frames
			.iter()
			.enumerate()
			.filter(|(_, frame)| frame.id == id)
			.nth(pos)
			.map(|(index, _)| index)
	}

	/// Get the `pos`th (0-based) frame with the identifier `id`
	pub fn get(&self, id: &str, pos: usize) -> Option<&Frame> {
		self.frames.iter().filter(|frame| frame.id == id).nth(pos)
	}

	/// Get a mutable reference to the `pos`th (0-based) frame with the identifier `id`
	pub fn get_mut(&mut self, id: &str, pos: usize) -> Option<&mut Frame> {
		self.frames.iter_mut().filter(|frame| frame.id == id).nth(pos)
	}

	/// Remove the `pos`th (0-based) frame with the identifier `id`
	pub fn remove(&mut self, id: &str, pos: usize) -> Option<Frame> {
		self.position(id, pos)
			.map(|index| self.frames.remove(index))
	}

	/// Remove every frame with the identifier `id`, returning the number removed
	pub fn remove_all(&mut self, id: &str) -> usize {
		let before = self.frames.len();
		self.frames.retain(|frame| frame.id != id);
		before - self.frames.len()
	}

	/// Retain only the frames specified by the predicate
	pub fn retain<F>(&mut self, f: F)
	where
		F: FnMut(&Frame) -> bool,
	{
		self.frames.retain(f)
	}

	/// The number of frames with the identifier `id`
	pub fn count(&self, id: &str) -> usize {
		self.frames.iter().filter(|frame| frame.id == id).count()
	}

	/// The total number of frames
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` if there are no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// An iterator over the frames, in order
	pub fn iter(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// A mutable iterator over the frames, in order
	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
		self.frames.iter_mut()
	}

	/// The identifiers of all frames, in order and with duplicates
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.frames.iter().map(Frame::id)
	}

	/// Remove all frames
	pub fn clear(&mut self) {
		self.frames.clear()
	}
}

impl IntoIterator for FrameList {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

impl<'a> IntoIterator for &'a FrameList {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.iter()
	}
}

impl FromIterator<Frame> for FrameList {
	fn from_iter<T: IntoIterator<Item = Frame>>(iter: T) -> Self {
		Self {
			frames: iter.into_iter().collect(),
		}
	}
}

impl Extend<Frame> for FrameList {
	fn extend<T: IntoIterator<Item = Frame>>(&mut self, iter: T) {
		self.frames.extend(iter)
	}
}

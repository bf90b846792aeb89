/// A text selection defined by anchor and head positions.
///
/// The anchor is the fixed end, and the head moves during selection extension.
/// A cursor is a selection whose anchor equals its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
	/// The fixed end of the selection.
	pub anchor: usize,
	/// The moving end of the selection (cursor position).
	pub head: usize,
}

impl Selection {
	/// Creates a new selection from anchor to head.
	pub fn new(anchor: usize, head: usize) -> Self {
		Self { anchor, head }
	}

	/// Creates a zero-width selection (cursor) at the given position.
	pub fn cursor(pos: usize) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the smaller of anchor and head.
	#[inline]
	pub fn from(&self) -> usize {
		self.anchor.min(self.head)
	}

	/// Returns the larger of anchor and head.
	#[inline]
	pub fn to(&self) -> usize {
		self.anchor.max(self.head)
	}

	/// Returns true if anchor equals head.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.head
	}

	/// Applies a function to both anchor and head.
	pub fn map(self, mut f: impl FnMut(usize) -> usize) -> Self {
		Self {
			anchor: f(self.anchor),
			head: f(self.head),
		}
	}

	/// Clamps anchor and head to `[0, max]`.
	pub fn clamp(self, max: usize) -> Self {
		self.map(|pos| pos.min(max))
	}
}

impl Default for Selection {
	fn default() -> Self {
		Self::cursor(0)
	}
}

//! Immutable document snapshots and position-addressed traversal.
//!
//! # Position model
//!
//! A text node occupies one position per character. Every other node except
//! the root occupies its content size plus two: one position for its opening
//! token and one for its closing token. Position 0 sits before the first
//! top-level block and [`Document::content_size`] is the last valid position.
//!
//! ```text
//!  0   1 2 3 4   5   6   7
//!  <h> F o o </h> <p> </p>
//! ```
//!
//! Position 6 above is inside the empty paragraph; position 5 is the boundary
//! between the heading and the paragraph.

use std::sync::Arc;

use smallvec::SmallVec;
use thiserror::Error;

use crate::node::{Node, NodeKind};


/// Errors raised by position lookups and traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
	/// A position lies past the end of the document.
	#[error("position {pos} out of range (document size {size})")]
	PositionOutOfRange {
		/// The offending position.
		pos: usize,
		/// Content size of the document.
		size: usize,
	},
	/// A range whose start lies after its end.
	#[error("invalid range {from}..{to}")]
	InvalidRange { from: usize, to: usize },
}

/// Immutable document snapshot.
///
/// Cloning is cheap: the tree is shared. Each transaction that changes the
/// document produces a new snapshot with a higher version.
#[derive(Debug, Clone)]
pub struct Document {
	root: Arc<Node>,
	version: u64,
}

impl Document {
	/// Creates a document at version 0 from top-level blocks.
	///
	/// A document always holds at least one block; an empty `blocks` list
	/// yields a single empty paragraph.
	pub fn new(blocks: Vec<Node>) -> Self {
		let blocks = if blocks.is_empty() { vec![Node::paragraph("")] } else { blocks };
		Self {
			root: Arc::new(Node::branch(NodeKind::Doc, blocks)),
			version: 0,
		}
	}

	/// Creates a document holding a single empty paragraph.
	pub fn empty() -> Self {
		Self::new(Vec::new())
	}

	pub fn root(&self) -> &Node {
		&self.root
	}

	/// Monotonic snapshot version, bumped by every document-changing transaction.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Last valid position in the document.
	pub fn content_size(&self) -> usize {
		self.root.content_size()
	}

	/// Concatenated text of the whole document.
	pub fn text_content(&self) -> String {
		self.root.text_content()
	}

	/// Calls `f` with every node overlapping `from..to`, in document order.
	///
	/// `f` receives the node and its start position. Returning `false` skips
	/// that node's children. A node is visited when it starts strictly before
	/// `to` and ends strictly after `from`.
	pub fn nodes_between<'a, F>(&'a self, from: usize, to: usize, mut f: F) -> Result<(), DocumentError>
	where
		F: FnMut(&'a Node, usize) -> bool,
	{
		if from > to {
			return Err(DocumentError::InvalidRange { from, to });
		}
		self.check_pos(to)?;
		walk(self.root.children(), from, to, 0, &mut f);
		Ok(())
	}

	/// Calls `f` with every node in the document, in document order.
	pub fn descendants<'a, F>(&'a self, mut f: F)
	where
		F: FnMut(&'a Node, usize) -> bool,
	{
		walk(self.root.children(), 0, self.content_size(), 0, &mut f);
	}

	/// Resolves `pos` to the chain of nodes containing it.
	pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, DocumentError> {
		self.check_pos(pos)?;

		let mut path: SmallVec<[Frame<'_>; 4]> = SmallVec::new();
		path.push(Frame {
			node: self.root.as_ref(),
			start: 0,
			index: 0,
		});

		loop {
			let Some(frame) = path.last() else { break };
			let mut offset = frame.start;
			let mut next = None;
			for (index, child) in frame.node.children().iter().enumerate() {
				if offset >= pos || child.is_text() {
					break;
				}
				let end = offset + child.node_size();
				if pos < end {
					next = Some(Frame {
						node: child,
						start: offset + 1,
						index,
					});
					break;
				}
				offset = end;
			}
			match next {
				Some(frame) => path.push(frame),
				None => break,
			}
		}

		Ok(ResolvedPos { pos, path })
	}

	/// Returns a snapshot with the given root and version.
	pub(crate) fn with_root(&self, root: Node, version: u64) -> Self {
		Self {
			root: Arc::new(root),
			version,
		}
	}

	/// Returns a new root where `range` of the children of the ancestor of
	/// `resolved` at `depth` is replaced.
	pub(crate) fn splice(
		&self,
		resolved: &ResolvedPos<'_>,
		depth: usize,
		range: std::ops::Range<usize>,
		replacement: Vec<Node>,
	) -> Node {
		let indices: SmallVec<[usize; 4]> = resolved.path.iter().skip(1).take(depth).map(|f| f.index).collect();
		splice_path(&self.root, &indices, range, replacement)
	}

	fn check_pos(&self, pos: usize) -> Result<(), DocumentError> {
		let size = self.content_size();
		if pos > size {
			return Err(DocumentError::PositionOutOfRange { pos, size });
		}
		Ok(())
	}
}

impl PartialEq for Document {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.root, &other.root) || self.root == other.root
	}
}

impl Eq for Document {}

impl Default for Document {
	fn default() -> Self {
		Self::empty()
	}
}

fn walk<'a, F>(children: &'a [Node], from: usize, to: usize, offset: usize, f: &mut F)
where
	F: FnMut(&'a Node, usize) -> bool,
{
	let mut pos = offset;
	for child in children {
		if pos >= to {
			break;
		}
		let end = pos + child.node_size();
		if end > from && f(child, pos) && !child.is_text() && child.content_size() > 0 {
			walk(child.children(), from, to, pos + 1, f);
		}
		pos = end;
	}
}

fn splice_path(node: &Node, indices: &[usize], range: std::ops::Range<usize>, replacement: Vec<Node>) -> Node {
	match indices.split_first() {
		None => node.splice_children(range, replacement),
		Some((&index, rest)) => {
			let child = splice_path(&node.children()[index], rest, range, replacement);
			node.splice_children(index..index + 1, vec![child])
		}
	}
}

/// One level of a resolved position.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
	node: &'a Node,
	/// Position of the first child slot inside `node`.
	start: usize,
	/// Index of `node` within its parent. Zero for the root.
	index: usize,
}

/// A position together with the chain of nodes that contain it.
///
/// Depth 0 is the document root; [`ResolvedPos::parent`] is the innermost
/// node whose content range holds the position.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
	pos: usize,
	path: SmallVec<[Frame<'a>; 4]>,
}

impl<'a> ResolvedPos<'a> {
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Depth of the innermost containing node.
	pub fn depth(&self) -> usize {
		self.path.len() - 1
	}

	/// Innermost node containing the position.
	pub fn parent(&self) -> &'a Node {
		self.node(self.depth())
	}

	/// Ancestor at `depth`.
	///
	/// # Panics
	///
	/// Panics if `depth` exceeds [`ResolvedPos::depth`].
	pub fn node(&self, depth: usize) -> &'a Node {
		self.path[depth].node
	}

	/// Start of the content of the ancestor at `depth`.
	pub fn start(&self, depth: usize) -> usize {
		self.path[depth].start
	}

	/// Offset of the position from the start of its parent's content.
	pub fn parent_offset(&self) -> usize {
		self.pos - self.start(self.depth())
	}

	/// Index within the parent of the ancestor at `depth`.
	pub(crate) fn index(&self, depth: usize) -> usize {
		self.path[depth].index
	}

	/// Index of the child slot in the parent that `pos` sits before, when the
	/// position lies on a child boundary.
	pub(crate) fn boundary_index(&self) -> Option<usize> {
		let parent = self.parent();
		let mut offset = self.start(self.depth());
		for (index, child) in parent.children().iter().enumerate() {
			if offset == self.pos {
				return Some(index);
			}
			offset += child.node_size();
		}
		(offset == self.pos).then_some(parent.children().len())
	}
}

use thiserror::Error;

use crate::document::{Document, DocumentError};
use crate::node::{Node, NodeKind};

/// Errors raised when a step cannot be applied to a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
	#[error(transparent)]
	Document(#[from] DocumentError),
	/// Inline edits require a position inside a heading or paragraph.
	#[error("position {0} is not inside a textblock")]
	NotInTextblock(usize),
	/// Block insertion requires a position between blocks.
	#[error("position {0} is not a block boundary")]
	NotBlockBoundary(usize),
	/// Deletions may not cross textblock boundaries.
	#[error("range {from}..{to} spans more than one textblock")]
	CrossBlockRange { from: usize, to: usize },
	/// Only block nodes can be inserted between blocks.
	#[error("cannot insert a {0} node as a block")]
	InvalidBlock(&'static str),
	/// An explicit selection lies outside the resulting document.
	#[error("selection {anchor}..{head} out of range (document size {size})")]
	SelectionOutOfRange { anchor: usize, head: usize, size: usize },
}

/// A single structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// Inserts `text` at `pos`, which must lie inside a textblock.
	InsertText { pos: usize, text: String },
	/// Deletes `from..to` inside one textblock.
	Delete { from: usize, to: usize },
	/// Splits the textblock containing `pos` in two.
	///
	/// Splitting a heading at its end yields a paragraph after it; splitting
	/// anywhere else keeps the block type on both halves.
	SplitBlock { pos: usize },
	/// Inserts a block node at the block boundary `pos`.
	InsertBlock { pos: usize, node: Node },
}

impl Step {
	/// Applies this step, returning the new root node.
	pub(crate) fn apply(&self, doc: &Document) -> Result<Node, StepError> {
		match self {
			Self::InsertText { pos, text } => {
				let resolved = doc.resolve(*pos)?;
				let block = resolved.parent();
				if !block.is_textblock() {
					return Err(StepError::NotInTextblock(*pos));
				}
				let current = block.inline_text();
				let split = byte_offset(current, resolved.parent_offset());
				let mut next = String::with_capacity(current.len() + text.len());
				next.push_str(&current[..split]);
				next.push_str(text);
				next.push_str(&current[split..]);
				Ok(replace_block(doc, &resolved, vec![block.with_inline_text(next)]))
			}
			Self::Delete { from, to } => {
				if from > to {
					return Err(DocumentError::InvalidRange { from: *from, to: *to }.into());
				}
				let start = doc.resolve(*from)?;
				let end = doc.resolve(*to)?;
				let block = start.parent();
				if !block.is_textblock() {
					return Err(StepError::NotInTextblock(*from));
				}
				if start.depth() != end.depth() || start.start(start.depth()) != end.start(end.depth()) {
					return Err(StepError::CrossBlockRange { from: *from, to: *to });
				}
				let current = block.inline_text();
				let a = byte_offset(current, start.parent_offset());
				let b = byte_offset(current, end.parent_offset());
				let next = format!("{}{}", &current[..a], &current[b..]);
				Ok(replace_block(doc, &start, vec![block.with_inline_text(next)]))
			}
			Self::SplitBlock { pos } => {
				let resolved = doc.resolve(*pos)?;
				let block = resolved.parent();
				if !block.is_textblock() {
					return Err(StepError::NotInTextblock(*pos));
				}
				let current = block.inline_text();
				let offset = resolved.parent_offset();
				let split = byte_offset(current, offset);
				let tail_kind = if block.kind().is_heading() && offset == block.content_size() {
					NodeKind::Paragraph
				} else {
					block.kind()
				};
				let head = block.with_inline_text(current[..split].to_owned());
				let tail = Node::textblock(tail_kind, current[split..].to_owned());
				Ok(replace_block(doc, &resolved, vec![head, tail]))
			}
			Self::InsertBlock { pos, node } => {
				if matches!(node.kind(), NodeKind::Text | NodeKind::Doc) {
					return Err(StepError::InvalidBlock(node.type_name()));
				}
				let resolved = doc.resolve(*pos)?;
				if resolved.parent().is_textblock() {
					return Err(StepError::NotBlockBoundary(*pos));
				}
				let index = resolved.boundary_index().ok_or(StepError::NotBlockBoundary(*pos))?;
				Ok(doc.splice(&resolved, resolved.depth(), index..index, vec![node.clone()]))
			}
		}
	}

	/// Maps a position from before this step to after it.
	///
	/// Positions at an insertion point move past the inserted content.
	pub fn map(&self, pos: usize) -> usize {
		match self {
			Self::InsertText { pos: at, text } if pos >= *at => pos + text.chars().count(),
			Self::Delete { from, to } if pos >= *to => pos - (to - from),
			Self::Delete { from, .. } if pos > *from => *from,
			Self::SplitBlock { pos: at } if pos >= *at => pos + 2,
			Self::InsertBlock { pos: at, node } if pos >= *at => pos + node.node_size(),
			_ => pos,
		}
	}
}

/// Replaces the textblock containing `resolved` with `replacement`.
fn replace_block(doc: &Document, resolved: &crate::document::ResolvedPos<'_>, replacement: Vec<Node>) -> Node {
	let depth = resolved.depth();
	let index = resolved.index(depth);
	doc.splice(resolved, depth - 1, index..index + 1, replacement)
}

fn byte_offset(text: &str, chars: usize) -> usize {
	text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

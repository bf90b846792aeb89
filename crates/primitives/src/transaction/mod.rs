//! Step-based transactions over immutable documents.
//!
//! A [`Transaction`] bundles ordered [`Step`]s, an optional explicit
//! selection and a [`Meta`] channel. Applying it never mutates its input: the
//! result is a new document snapshot and selection, or an error that leaves
//! the caller's state untouched.

mod meta;
mod step;

pub use meta::{Meta, MetaValue};
pub use step::{Step, StepError};

use crate::document::Document;
use crate::node::Node;
use crate::selection::Selection;

/// An ordered batch of edits plus selection and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
	steps: Vec<Step>,
	selection: Option<Selection>,
	meta: Meta,
}

impl Transaction {
	/// Creates an empty transaction. Applying it changes nothing.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn step(mut self, step: Step) -> Self {
		self.steps.push(step);
		self
	}

	pub fn insert_text(self, pos: usize, text: impl Into<String>) -> Self {
		self.step(Step::InsertText { pos, text: text.into() })
	}

	pub fn delete(self, from: usize, to: usize) -> Self {
		self.step(Step::Delete { from, to })
	}

	pub fn split_block(self, pos: usize) -> Self {
		self.step(Step::SplitBlock { pos })
	}

	pub fn insert_block(self, pos: usize, node: Node) -> Self {
		self.step(Step::InsertBlock { pos, node })
	}

	/// Sets an explicit selection, expressed in post-step positions.
	pub fn set_selection(mut self, selection: Selection) -> Self {
		self.selection = Some(selection);
		self
	}

	pub fn set_meta(mut self, key: &'static str, value: impl Into<MetaValue>) -> Self {
		self.meta.set(key, value);
		self
	}

	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	pub fn meta(&self) -> &Meta {
		&self.meta
	}

	/// Explicit selection carried by this transaction, if any.
	pub fn selection(&self) -> Option<Selection> {
		self.selection
	}

	/// True when the transaction edits the document.
	pub fn doc_changed(&self) -> bool {
		!self.steps.is_empty()
	}

	/// True when the transaction sets the selection explicitly.
	pub fn selection_set(&self) -> bool {
		self.selection.is_some()
	}

	/// Applies every step to `doc` and resolves the resulting selection.
	///
	/// Without an explicit selection, `selection` is mapped through the
	/// steps. The document version is bumped once when any step applied.
	pub fn apply(&self, doc: &Document, selection: Selection) -> Result<(Document, Selection), StepError> {
		let mut next = doc.clone();
		let mut mapped = selection;
		for step in &self.steps {
			let root = step.apply(&next)?;
			next = next.with_root(root, doc.version() + 1);
			mapped = mapped.map(|pos| step.map(pos));
		}

		let size = next.content_size();
		let selection = match self.selection {
			Some(sel) if sel.anchor > size || sel.head > size => {
				return Err(StepError::SelectionOutOfRange {
					anchor: sel.anchor,
					head: sel.head,
					size,
				});
			}
			Some(sel) => sel,
			None => mapped.clamp(size),
		};

		Ok((next, selection))
	}
}

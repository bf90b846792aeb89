//! Immutable editor state snapshots.

use quill_placeholder::{Placeholder, PlaceholderState};
use quill_primitives::{Document, Selection, StepError, Transaction};
use tokio::time::Instant;

/// Document, selection and placeholder state for one view.
///
/// [`EditorState::apply`] produces the next snapshot; the previous one is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
	doc: Document,
	selection: Selection,
	placeholder: PlaceholderState,
}

impl EditorState {
	/// Creates a state with `selection` clamped into `doc`.
	pub fn new(doc: Document, selection: Selection, engine: &Placeholder, now: Instant) -> Self {
		let selection = selection.clamp(doc.content_size());
		Self {
			doc,
			selection,
			placeholder: engine.init(now),
		}
	}

	pub fn doc(&self) -> &Document {
		&self.doc
	}

	pub fn selection(&self) -> Selection {
		self.selection
	}

	pub fn placeholder(&self) -> &PlaceholderState {
		&self.placeholder
	}

	/// Applies `tr`, then runs the placeholder reducer over the result.
	///
	/// On error the current state is unaffected.
	pub fn apply(&self, tr: &Transaction, engine: &Placeholder, now: Instant) -> Result<Self, StepError> {
		let (doc, selection) = tr.apply(&self.doc, self.selection)?;
		let placeholder = engine.apply_transaction(&self.placeholder, tr, &doc, selection, now);
		Ok(Self {
			doc,
			selection,
			placeholder,
		})
	}
}

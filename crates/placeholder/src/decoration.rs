//! Decoration rendering.
//!
//! Decorations are ephemeral widgets computed from scratch on every render.
//! Three rules apply independently:
//!
//! 1. An empty paragraph under the cursor shows the first prompt of its
//!    section's pool as an inline widget before the cursor. An empty heading
//!    under the cursor shows a fixed "Heading..." hint instead.
//! 2. After a pause, the active prompt is shown as a block widget after the
//!    cursor, as long as the cursor has not moved away from it.

use quill_primitives::{Document, NodeKind, Selection};

use crate::context::resolve_context;
use crate::registry::PromptRegistry;
use crate::state::PlaceholderState;

/// Text shown by the empty-section rule when the first prompt is blank.
pub const EMPTY_SECTION_FALLBACK: &str = "Start writing...";
/// Class carried by empty-section placeholders.
pub const EMPTY_SECTION_CLASS: &str = "writing-prompt empty-section";
/// Text shown inside an empty heading under the cursor.
pub const EMPTY_HEADING_TEXT: &str = "Heading...";
/// Class carried by empty-heading placeholders.
pub const EMPTY_HEADING_CLASS: &str = "writing-prompt empty-heading";
/// Class carried by continuation placeholders.
pub const CONTINUATION_CLASS: &str = "writing-prompt continuation";

/// Which side of its position a widget attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	Before,
	After,
}

impl Side {
	/// Signed bias: `-1` before, `+1` after.
	pub const fn bias(self) -> i8 {
		match self {
			Self::Before => -1,
			Self::After => 1,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
	/// Rendered within the line.
	Inline,
	/// Rendered on its own line.
	Block,
}

/// A positioned, non-editable widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	pub pos: usize,
	pub side: Side,
	pub kind: DecorationKind,
	pub class: &'static str,
	pub text: String,
}

/// Decorations computed for one document version, ordered by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
	doc_version: u64,
	decorations: Vec<Decoration>,
}

impl DecorationSet {
	fn new(doc_version: u64, mut decorations: Vec<Decoration>) -> Self {
		decorations.sort_by_key(|d| d.pos);
		Self {
			doc_version,
			decorations,
		}
	}

	/// Version of the document these decorations were computed for.
	pub fn doc_version(&self) -> u64 {
		self.doc_version
	}

	pub fn is_empty(&self) -> bool {
		self.decorations.is_empty()
	}

	pub fn len(&self) -> usize {
		self.decorations.len()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
		self.decorations.iter()
	}

	/// Decorations positioned within `from..=to`.
	pub fn find(&self, from: usize, to: usize) -> impl Iterator<Item = &Decoration> {
		self.decorations.iter().filter(move |d| d.pos >= from && d.pos <= to)
	}
}

impl<'a> IntoIterator for &'a DecorationSet {
	type Item = &'a Decoration;
	type IntoIter = std::slice::Iter<'a, Decoration>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Computes the decorations for `doc` under `selection`.
///
/// Pure and infallible: resolution failures are logged and skip the rule.
pub fn render(doc: &Document, selection: Selection, state: &PlaceholderState, registry: &PromptRegistry) -> DecorationSet {
	let mut decorations = Vec::with_capacity(2);
	decorations.extend(empty_section(doc, selection, registry));
	decorations.extend(continuation(selection, state));
	DecorationSet::new(doc.version(), decorations)
}

fn empty_section(doc: &Document, selection: Selection, registry: &PromptRegistry) -> Option<Decoration> {
	let pos = selection.from();
	let resolved = match doc.resolve(pos) {
		Ok(resolved) => resolved,
		Err(err) => {
			tracing::warn!(pos, %err, "placeholder.render.resolve_failed");
			return None;
		}
	};
	let parent = resolved.parent();
	if parent.content_size() != 0 {
		return None;
	}

	let (class, text) = match parent.kind() {
		NodeKind::Paragraph => {
			let context = resolve_context(doc, pos);
			let first = registry.lookup(&context).first();
			let text = if first.is_empty() { EMPTY_SECTION_FALLBACK } else { first };
			(EMPTY_SECTION_CLASS, text)
		}
		NodeKind::Heading { .. } => (EMPTY_HEADING_CLASS, EMPTY_HEADING_TEXT),
		_ => return None,
	};
	Some(Decoration {
		pos,
		side: Side::Before,
		kind: DecorationKind::Inline,
		class,
		text: text.to_owned(),
	})
}

fn continuation(selection: Selection, state: &PlaceholderState) -> Option<Decoration> {
	if !state.is_idle() {
		return None;
	}
	let prompt = state.active_prompt()?;
	(selection.head == prompt.pos).then(|| Decoration {
		pos: prompt.pos,
		side: Side::After,
		kind: DecorationKind::Block,
		class: CONTINUATION_CLASS,
		text: prompt.text.clone(),
	})
}

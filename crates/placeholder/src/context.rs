//! Position to section-context resolution.

use quill_primitives::{Document, Node};

/// Context key used when no heading precedes a position.
pub const DEFAULT_CONTEXT: &str = "default";

/// Resolves the context key for `pos`: the trimmed text of the nearest heading
/// that starts before it.
///
/// Falls back to [`DEFAULT_CONTEXT`] when no heading precedes `pos`, when the
/// nearest heading has no text, and when `pos` lies outside the document.
pub fn resolve_context(doc: &Document, pos: usize) -> String {
	let mut heading: Option<&Node> = None;
	let walked = doc.nodes_between(0, pos, |node, _| {
		if node.kind().is_heading() {
			heading = Some(node);
		}
		true
	});

	if let Err(err) = walked {
		tracing::warn!(pos, %err, "placeholder.context.resolve_failed");
		return DEFAULT_CONTEXT.to_owned();
	}

	let Some(heading) = heading else {
		return DEFAULT_CONTEXT.to_owned();
	};
	let text = heading.text_content();
	match text.trim() {
		"" => DEFAULT_CONTEXT.to_owned(),
		key => key.to_owned(),
	}
}

//! Common utilities for view integration tests.

use std::sync::Arc;

use quill_config::PlaceholderOptions;
use quill_editor::EditorView;
use quill_placeholder::{Placeholder, PromptRegistry};
use quill_primitives::{Document, Selection, parse_outline};

/// Engine whose "Foo" section rotates through "A" and "B".
pub fn foo_engine() -> Arc<Placeholder> {
	let registry = PromptRegistry::new([vec![("Foo".to_owned(), vec!["A".to_owned(), "B".to_owned()])]]);
	Arc::new(Placeholder::new(registry, PlaceholderOptions::default()))
}

/// "Foo" heading followed by a written paragraph.
pub fn foo_doc() -> Document {
	parse_outline("## Foo\nwritten\n")
}

/// Cursor at the end of the paragraph in [`foo_doc`].
pub const FOO_END: usize = 13;

/// Mounts a view over [`foo_doc`] with the cursor at [`FOO_END`].
pub fn mount_foo() -> EditorView {
	let _ = tracing_subscriber::fmt().with_env_filter("quill=trace").try_init();
	EditorView::mount(foo_engine(), foo_doc(), Selection::cursor(FOO_END)).expect("mount")
}

/// Texts of the decorations currently shown by `view`.
pub fn decoration_texts(view: &EditorView) -> Vec<String> {
	view.decorations().iter().map(|d| d.text.clone()).collect()
}

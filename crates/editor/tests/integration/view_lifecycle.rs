use std::time::Duration;

use pretty_assertions::assert_eq;
use quill_editor::{DispatchError, EditorView};
use quill_placeholder::{CONTINUATION_CLASS, EMPTY_SECTION_CLASS, Placeholder, idle_trigger_for};
use quill_primitives::{Document, Selection, Transaction};
use quill_worker::TaskExit;
use tokio::time::{Instant, timeout};

use crate::common::{FOO_END, decoration_texts, foo_engine, mount_foo};

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn prompt_appears_after_pause() {
	let mut view = mount_foo();
	let start = Instant::now();
	assert!(view.decorations().is_empty());

	assert!(view.next().await);
	assert_eq!(Instant::now() - start, Duration::from_secs(2));

	let placeholder = view.state().placeholder();
	assert!(placeholder.is_idle());
	assert_eq!(placeholder.active_pos(), Some(FOO_END));
	assert_eq!(placeholder.rotation_index("Foo"), 1);

	let set = view.decorations();
	let shown: Vec<_> = set.iter().map(|d| (d.pos, d.class, d.text.as_str())).collect();
	assert_eq!(shown, vec![(FOO_END, CONTINUATION_CLASS, "A")]);
	assert_eq!(set.doc_version(), view.state().doc().version());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn typing_clears_prompt_and_next_pause_rotates() {
	let mut view = mount_foo();
	assert!(view.next().await);
	assert_eq!(decoration_texts(&view), vec!["A"]);

	view.dispatch(Transaction::new().insert_text(FOO_END, "!")).unwrap();
	assert_eq!(view.drain(), 1);
	assert!(!view.state().placeholder().is_idle());
	assert!(view.decorations().is_empty());
	assert_eq!(view.state().selection(), Selection::cursor(FOO_END + 1));

	let typed = Instant::now();
	assert!(view.next().await);
	assert_eq!(Instant::now() - typed, Duration::from_secs(2));
	assert_eq!(decoration_texts(&view), vec!["B"]);
	assert_eq!(view.state().placeholder().active_pos(), Some(FOO_END + 1));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn moving_the_cursor_clears_prompt() {
	let mut view = mount_foo();
	assert!(view.next().await);

	let dispatcher = view.dispatcher();
	dispatcher.dispatch(Transaction::new().set_selection(Selection::cursor(8))).unwrap();
	assert_eq!(view.drain(), 1);
	assert!(!view.state().placeholder().is_idle());
	assert!(view.decorations().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn only_one_trigger_per_pause() {
	let mut view = mount_foo();
	assert!(view.next().await);

	assert!(timeout(Duration::from_secs(30), view.next()).await.is_err());
	assert_eq!(view.state().placeholder().rotation_index("Foo"), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn empty_document_shows_only_empty_section_prompt() {
	let mut view = EditorView::mount(foo_engine(), Document::empty(), Selection::cursor(1)).unwrap();
	let before: Vec<_> = view.decorations().iter().map(|d| d.class).collect();
	assert_eq!(before, vec![EMPTY_SECTION_CLASS]);

	assert!(view.next().await);
	let placeholder = view.state().placeholder();
	assert!(placeholder.is_idle());
	assert_eq!(placeholder.active_prompt(), None);
	assert_eq!(decoration_texts(&view), vec!["What's on your mind?"]);

	assert!(timeout(Duration::from_secs(30), view.next()).await.is_err());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn queued_transactions_apply_in_order() {
	let mut view = mount_foo();

	let seen = view.state().placeholder().input_seq();
	view.dispatch(Transaction::new().insert_text(FOO_END, " more")).unwrap();
	view.dispatch(idle_trigger_for(seen)).unwrap();
	assert_eq!(view.drain(), 2);
	assert!(!view.state().placeholder().is_idle());
	assert!(view.decorations().is_empty());

	let seen = view.state().placeholder().input_seq();
	view.dispatch(idle_trigger_for(seen)).unwrap();
	assert_eq!(view.drain(), 1);
	assert_eq!(decoration_texts(&view), vec!["A"]);

	let seen = view.state().placeholder().input_seq();
	view.dispatch(idle_trigger_for(seen)).unwrap();
	view.dispatch(Transaction::new().insert_text(FOO_END, "x")).unwrap();
	assert_eq!(view.drain(), 2);
	assert!(!view.state().placeholder().is_idle());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keystroke_queued_before_tick_cancels_trigger() {
	let mut view = mount_foo();
	let start = Instant::now();

	tokio::time::sleep(Duration::from_millis(1900)).await;
	view.dispatch(Transaction::new().insert_text(FOO_END, "!")).unwrap();
	// The 2s tick still sees the pre-keystroke snapshot.
	tokio::time::sleep(Duration::from_millis(150)).await;
	assert_eq!(view.drain(), 2);

	let placeholder = view.state().placeholder();
	assert!(!placeholder.is_idle());
	assert_eq!(placeholder.rotation_index("Foo"), 0);
	assert!(view.decorations().is_empty());

	let typed = placeholder.last_input();
	assert_eq!(typed - start, Duration::from_millis(2050));
	assert!(view.next().await);
	assert_eq!(Instant::now() - typed, Duration::from_millis(1950));
	assert_eq!(decoration_texts(&view), vec!["A"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn invalid_transactions_are_dropped() {
	let mut view = mount_foo();
	let before = view.state().clone();

	view.dispatch(Transaction::new().delete(0, 500)).unwrap();
	view.dispatch(Transaction::new().set_selection(Selection::cursor(500))).unwrap();
	assert_eq!(view.drain(), 0);
	assert_eq!(view.state(), &before);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn destroy_stops_scheduler_and_closes_dispatch() {
	let view = mount_foo();
	let dispatcher = view.dispatcher();
	assert!(view.is_scheduler_running());

	assert_eq!(view.destroy().await, TaskExit::Finished);
	assert!(matches!(
		dispatcher.dispatch(Transaction::new()),
		Err(DispatchError::ViewClosed)
	));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn custom_thresholds_are_honored() {
	let config = quill_config::Config::from_toml("[placeholder]\npause_threshold_ms = 4000\ntick_interval_ms = 500\n").unwrap();
	let engine = std::sync::Arc::new(Placeholder::from_config(&config));
	let doc = crate::common::foo_doc();
	let mut view = EditorView::mount(engine, doc, Selection::cursor(FOO_END)).unwrap();
	let start = Instant::now();

	assert!(view.next().await);
	assert_eq!(Instant::now() - start, Duration::from_millis(4500));
}

#[test]
fn mount_requires_a_runtime() {
	let engine = std::sync::Arc::new(Placeholder::default());
	assert!(EditorView::mount(engine, Document::empty(), Selection::cursor(1)).is_err());
}

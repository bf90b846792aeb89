use pretty_assertions::assert_eq;
use quill_config::Config;
use quill_primitives::{Node, parse_outline};

use super::*;

#[test]
fn unconfigured_engine_uses_builtin_prompts() {
	let engine = Placeholder::from_config(&Config::default());
	assert_eq!(engine.registry().default_pool().len(), 4);
}

#[test]
fn bundled_config_falls_back_to_short_default() {
	let engine = Placeholder::from_config(&Config::bundled().unwrap());
	assert_eq!(engine.registry().default_pool().len(), 3);
	assert_eq!(engine.registry().lookup("The Problem").first(), "What pain point or gap exists in the market?");
}

#[test]
fn top_level_prompts_override_template_prompts() {
	let src = r#"
		[prompts]
		"The Problem" = ["Mine."]

		[[template]]
		id = "t"
		title = "T"
		[template.prompts]
		"The Problem" = ["Theirs."]
	"#;
	let engine = Placeholder::from_config(&Config::from_toml(src).unwrap());
	assert_eq!(engine.registry().lookup("The Problem").first(), "Mine.");
}

#[test]
fn min_content_size_is_configurable() {
	let config = Config::from_toml("[placeholder]\nmin_content_size = 20\n").unwrap();
	let engine = Placeholder::from_config(&config);
	let doc = Document::new(vec![Node::heading(1, "Short"), Node::paragraph("text")]);
	let now = Instant::now();

	let state = engine.apply(&engine.init(now), PlaceholderEvent::IdleTrigger { input_seq: None }, &doc, Selection::cursor(10), now);
	assert!(state.is_idle());
	assert_eq!(state.active_prompt(), None);
}

#[test]
fn transactions_drive_the_engine() {
	let engine = Placeholder::default();
	let doc = parse_outline("# Notes\nsome text\n");
	let cursor = Selection::cursor(doc.content_size() - 1);
	let now = Instant::now();
	let state = engine.init(now);

	let idle = engine.apply_transaction(&state, &idle_trigger(), &doc, cursor, now);
	assert_eq!(idle.active_prompt().map(|p| p.text.as_str()), Some("What's on your mind?"));

	let untouched = engine.apply_transaction(&idle, &Transaction::new().set_meta("other", 3i64), &doc, cursor, now);
	assert_eq!(untouched, idle);

	let moved = Transaction::new().set_selection(Selection::cursor(3));
	let active = engine.apply_transaction(&idle, &moved, &doc, Selection::cursor(3), now);
	assert!(!active.is_idle());
	assert!(engine.decorations(&doc, Selection::cursor(3), &active).is_empty());
}

#[test]
fn scenario_heading_foo_with_empty_paragraph() {
	let registry = PromptRegistry::new([vec![("Foo".to_owned(), vec!["A".to_owned(), "B".to_owned()])]]);
	let engine = Placeholder::new(registry, PlaceholderOptions::default());
	let doc = Document::new(vec![Node::heading(2, "Foo"), Node::paragraph("")]);

	assert_eq!(resolve_context(&doc, 5), "Foo");
	let set = engine.decorations(&doc, Selection::cursor(6), &engine.init(Instant::now()));
	assert_eq!(set.iter().map(|d| d.text.as_str()).collect::<Vec<_>>(), vec!["A"]);
}

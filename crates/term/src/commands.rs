//! Subcommand implementations.

use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use quill_config::Config;
use quill_editor::EditorState;
use quill_placeholder::{Decoration, Placeholder, idle_trigger, resolve_context};
use quill_primitives::{Document, Selection, parse_outline};
use tokio::time::Instant;

use crate::cli::InspectArgs;

/// Loads `path`, or the default config file when it exists, layered over the
/// bundled templates.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
	let user = match path {
		Some(path) => Config::load(path)?,
		None => match Config::default_path().filter(|p| p.is_file()) {
			Some(path) => Config::load(&path)?,
			None => Config::default(),
		},
	};
	Ok(user.with_bundled()?)
}

/// Writes one block per template: id and title, then its prompt headings.
pub fn list_templates(config: &Config, out: &mut impl Write) -> std::io::Result<()> {
	for template in config.templates.iter() {
		writeln!(out, "{}\t{}", template.id, template.title)?;
		if !template.description.is_empty() {
			writeln!(out, "  {}", template.description)?;
		}
		for (heading, prompts) in &template.prompts {
			writeln!(out, "  - {heading} ({})", prompts.len())?;
		}
	}
	Ok(())
}

/// Result of `quill inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
	pub context: String,
	pub idle: bool,
	pub prompt: Option<String>,
	pub decorations: Vec<Decoration>,
}

/// Builds the requested document, places the cursor and simulates
/// `args.idle` pauses.
pub fn inspect(config: &Config, args: &InspectArgs) -> anyhow::Result<Inspection> {
	let doc = initial_document(config, args)?;
	let size = doc.content_size();
	if args.cursor > size {
		bail!("cursor {} is outside the document (size {size})", args.cursor);
	}

	let engine = Placeholder::from_config(config);
	let mut state = EditorState::new(doc, Selection::cursor(args.cursor), &engine, Instant::now());
	for _ in 0..args.idle {
		state = state.apply(&idle_trigger(), &engine, Instant::now())?;
	}

	let placeholder = state.placeholder();
	let decorations = engine.decorations(state.doc(), state.selection(), placeholder);
	Ok(Inspection {
		context: resolve_context(state.doc(), state.selection().to()),
		idle: placeholder.is_idle(),
		prompt: placeholder.active_prompt().map(|p| p.text.clone()),
		decorations: decorations.iter().cloned().collect(),
	})
}

fn initial_document(config: &Config, args: &InspectArgs) -> anyhow::Result<Document> {
	if let Some(id) = &args.template {
		let template = config
			.templates
			.get(id)
			.with_context(|| format!("no template with id {id:?}"))?;
		return Ok(template.document());
	}
	if let Some(path) = &args.outline {
		let src = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
		return Ok(parse_outline(&src));
	}
	Ok(Document::empty())
}

impl fmt::Display for Inspection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "context: {}", self.context)?;
		writeln!(f, "state: {}", if self.idle { "idle" } else { "active" })?;
		if let Some(prompt) = &self.prompt {
			writeln!(f, "prompt: {prompt}")?;
		}
		for d in &self.decorations {
			writeln!(f, "decoration: {} {:?} side={} {:?}", d.pos, d.kind, d.side.bias(), d.text)?;
		}
		Ok(())
	}
}

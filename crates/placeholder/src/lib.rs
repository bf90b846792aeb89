//! Idle-aware contextual writing prompts.
//!
//! The engine shows three kinds of placeholder over a document:
//!
//! - an **empty-section** prompt inside an empty paragraph, chosen from the
//!   pool of the nearest preceding heading,
//! - a fixed hint inside an empty heading, and
//! - a **continuation** prompt at the cursor once the user has paused,
//!   rotating through the pool on every pause.
//!
//! [`Placeholder`] bundles the prompt registry with engine options and
//! exposes the reducer and renderer. [`IdleScheduler`] detects pauses and
//! feeds idle triggers back through the view's transaction channel.

pub mod context;
pub mod decoration;
pub mod idle;
pub mod registry;
pub mod state;

use quill_config::{Config, PlaceholderOptions};
use quill_primitives::{Document, Selection, Transaction};
use tokio::time::Instant;

pub use context::{DEFAULT_CONTEXT, resolve_context};
pub use decoration::{
	CONTINUATION_CLASS, Decoration, DecorationKind, DecorationSet, EMPTY_HEADING_CLASS, EMPTY_HEADING_TEXT, EMPTY_SECTION_CLASS,
	EMPTY_SECTION_FALLBACK, Side, render,
};
pub use idle::{IdleDetector, IdleProbe, IdleScheduler, IdleSnapshot, SinkClosed, TriggerSink};
pub use registry::{PromptPool, PromptRegistry};
pub use state::{ActivePrompt, Phase, PlaceholderEvent, PlaceholderState, ReduceContext};

/// Transaction meta key marking a synthetic idle trigger.
pub const IDLE_TRIGGER: &str = "placeholder.idle_trigger";

/// Transaction meta key stamping an idle trigger with the input sequence
/// number it was detected after.
pub const IDLE_INPUT_SEQ: &str = "placeholder.idle_input_seq";

/// An unstamped idle trigger, applied to whatever input precedes it.
pub fn idle_trigger() -> Transaction {
	Transaction::new().set_meta(IDLE_TRIGGER, true)
}

/// The idle trigger the scheduler submits after observing `input_seq`.
///
/// Ignored by the reducer if more input has been applied since.
pub fn idle_trigger_for(input_seq: u64) -> Transaction {
	idle_trigger().set_meta(IDLE_INPUT_SEQ, input_seq as i64)
}

/// The placeholder engine: prompt pools plus tuning.
#[derive(Debug, Clone, Default)]
pub struct Placeholder {
	registry: PromptRegistry,
	options: PlaceholderOptions,
}

impl Placeholder {
	pub fn new(registry: PromptRegistry, options: PlaceholderOptions) -> Self {
		Self { registry, options }
	}

	/// Builds an engine from configuration: template prompts first, then the
	/// top-level `[prompts]` table.
	pub fn from_config(config: &Config) -> Self {
		let sources = config.prompt_sources();
		let registry = if sources.iter().all(|map| map.is_empty()) {
			PromptRegistry::default()
		} else {
			PromptRegistry::new(sources)
		};
		Self::new(registry, config.placeholder)
	}

	pub fn registry(&self) -> &PromptRegistry {
		&self.registry
	}

	pub fn options(&self) -> &PlaceholderOptions {
		&self.options
	}

	/// Initial state for a newly mounted view.
	pub fn init(&self, now: Instant) -> PlaceholderState {
		PlaceholderState::new(now)
	}

	/// Applies `event` to `state`, reading the post-transaction document and
	/// selection.
	pub fn apply(
		&self,
		state: &PlaceholderState,
		event: PlaceholderEvent,
		doc: &Document,
		selection: Selection,
		now: Instant,
	) -> PlaceholderState {
		let cx = ReduceContext {
			doc,
			selection,
			registry: &self.registry,
			min_content_size: self.options.min_content_size,
			now,
		};
		state.reduce(event, &cx)
	}

	/// Applies the event carried by `tr`, if any. Transactions carrying no
	/// placeholder event leave the state as it was.
	pub fn apply_transaction(
		&self,
		state: &PlaceholderState,
		tr: &Transaction,
		doc: &Document,
		selection: Selection,
		now: Instant,
	) -> PlaceholderState {
		match PlaceholderEvent::from_transaction(tr) {
			Some(event) => self.apply(state, event, doc, selection, now),
			None => state.clone(),
		}
	}

	/// Decorations for `doc` under `selection`.
	pub fn decorations(&self, doc: &Document, selection: Selection, state: &PlaceholderState) -> DecorationSet {
		render(doc, selection, state, &self.registry)
	}
}

#[cfg(test)]
mod tests;

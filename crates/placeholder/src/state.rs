//! Placeholder state and its reducer.

use std::sync::Arc;

use quill_primitives::{Document, MetaValue, Selection, Transaction};
use rustc_hash::FxHashMap;
use tokio::time::Instant;

use crate::{IDLE_INPUT_SEQ, IDLE_TRIGGER};
use crate::context::resolve_context;
use crate::registry::PromptRegistry;

/// A prompt offered after a pause, anchored where the cursor was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePrompt {
	pub text: String,
	pub pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
	/// The user is typing or moving the cursor.
	Active,
	/// A pause was detected. `prompt` is `None` on an effectively empty
	/// document.
	Idle { prompt: Option<ActivePrompt> },
}

/// What a transaction means to the placeholder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderEvent {
	DocChanged,
	SelectionChanged,
	/// A pause was detected.
	///
	/// `input_seq` is the input sequence number the detector observed. A
	/// stamped trigger whose stamp no longer matches the state is stale and is
	/// ignored. Unstamped triggers always apply.
	IdleTrigger { input_seq: Option<u64> },
}

impl PlaceholderEvent {
	/// Classifies `tr`. A document change wins over a selection change, which
	/// wins over the idle-trigger meta flag.
	pub fn from_transaction(tr: &Transaction) -> Option<Self> {
		if tr.doc_changed() {
			Some(Self::DocChanged)
		} else if tr.selection_set() {
			Some(Self::SelectionChanged)
		} else if tr.meta().flag(IDLE_TRIGGER) {
			let input_seq = match tr.meta().get(IDLE_INPUT_SEQ) {
				Some(MetaValue::Int(seq)) => Some(*seq as u64),
				_ => None,
			};
			Some(Self::IdleTrigger { input_seq })
		} else {
			None
		}
	}
}

/// Inputs the reducer reads besides the previous state.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
	pub doc: &'a Document,
	pub selection: Selection,
	pub registry: &'a PromptRegistry,
	pub min_content_size: usize,
	pub now: Instant,
}

/// Per-view placeholder state.
///
/// Snapshots are immutable; [`PlaceholderState::reduce`] returns the next one.
/// The rotation table is shared between snapshots until an idle trigger
/// advances it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderState {
	last_input: Instant,
	input_seq: u64,
	phase: Phase,
	rotation: Arc<FxHashMap<String, usize>>,
}

impl PlaceholderState {
	/// Fresh state: active, nothing rotated, last input at `now`.
	pub fn new(now: Instant) -> Self {
		Self {
			last_input: now,
			input_seq: 0,
			phase: Phase::Active,
			rotation: Arc::default(),
		}
	}

	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	pub fn is_idle(&self) -> bool {
		matches!(self.phase, Phase::Idle { .. })
	}

	pub fn active_prompt(&self) -> Option<&ActivePrompt> {
		match &self.phase {
			Phase::Idle { prompt } => prompt.as_ref(),
			Phase::Active => None,
		}
	}

	/// Position the active prompt is anchored to.
	pub fn active_pos(&self) -> Option<usize> {
		self.active_prompt().map(|prompt| prompt.pos)
	}

	/// Time of the last document or selection change.
	pub fn last_input(&self) -> Instant {
		self.last_input
	}

	/// Number of document or selection changes seen so far.
	pub fn input_seq(&self) -> u64 {
		self.input_seq
	}

	/// Next rotation slot for `context`; zero if never rotated.
	pub fn rotation_index(&self, context: &str) -> usize {
		self.rotation.get(context).copied().unwrap_or(0)
	}

	/// Computes the state following `event`. Never fails.
	pub fn reduce(&self, event: PlaceholderEvent, cx: &ReduceContext<'_>) -> Self {
		match event {
			PlaceholderEvent::DocChanged | PlaceholderEvent::SelectionChanged => {
				if self.is_idle() {
					tracing::trace!(?event, "placeholder.state.active");
				}
				Self {
					last_input: cx.now,
					input_seq: self.input_seq.wrapping_add(1),
					phase: Phase::Active,
					rotation: Arc::clone(&self.rotation),
				}
			}
			PlaceholderEvent::IdleTrigger { input_seq: Some(seq) } if seq != self.input_seq => {
				tracing::trace!(seen = seq, current = self.input_seq, "placeholder.state.stale_trigger");
				self.clone()
			}
			PlaceholderEvent::IdleTrigger { .. } => self.enter_idle(cx),
		}
	}

	fn enter_idle(&self, cx: &ReduceContext<'_>) -> Self {
		if cx.doc.content_size() <= cx.min_content_size {
			tracing::trace!(content_size = cx.doc.content_size(), "placeholder.state.idle_suppressed");
			return Self {
				last_input: self.last_input,
				input_seq: self.input_seq,
				phase: Phase::Idle { prompt: None },
				rotation: Arc::clone(&self.rotation),
			};
		}

		let context = resolve_context(cx.doc, cx.selection.to());
		let pool = cx.registry.lookup(&context);
		let index = self.rotation_index(&context) % pool.len();
		let text = pool.get(index).to_owned();

		tracing::debug!(%context, index, pos = cx.selection.head, "placeholder.state.idle");

		let mut rotation = (*self.rotation).clone();
		rotation.insert(context, index + 1);

		Self {
			last_input: self.last_input,
			input_seq: self.input_seq,
			phase: Phase::Idle {
				prompt: Some(ActivePrompt {
					text,
					pos: cx.selection.head,
				}),
			},
			rotation: Arc::new(rotation),
		}
	}
}

//! A mounted view: the single writer of its [`EditorState`].
//!
//! ```text
//! user input ───► Dispatcher ─┐
//!                             ├──► transaction channel ──► EditorView::drain ──► EditorState::apply
//! IdleScheduler ──────────────┘                                                      │
//!       ▲                                                                            │
//!       └────────────────────────── IdleSnapshot (watch) ◄───────────────────────────┘
//! ```
//!
//! Every state change, user-driven or timer-driven, passes through one
//! ordered channel and is applied serially.

use std::sync::Arc;

use quill_placeholder::{DecorationSet, IdleScheduler, IdleSnapshot, Placeholder};
use quill_primitives::{Document, Selection, Transaction};
use quill_worker::{SpawnError, TaskExit};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::error::DispatchError;
use crate::state::EditorState;

/// Sending half of a view's transaction channel.
pub type TxSender = mpsc::UnboundedSender<Transaction>;

/// Receiving half of a view's transaction channel.
pub type TxReceiver = mpsc::UnboundedReceiver<Transaction>;

/// Submits transactions to a view. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
	tx: TxSender,
}

impl Dispatcher {
	/// Queues `tr` behind every earlier submission.
	pub fn dispatch(&self, tr: Transaction) -> Result<(), DispatchError> {
		self.tx.send(tr)?;
		Ok(())
	}
}

/// A view over one document with its idle scheduler running.
///
/// Destroying or dropping the view stops the scheduler.
#[derive(Debug)]
pub struct EditorView {
	state: EditorState,
	engine: Arc<Placeholder>,
	tx: TxSender,
	rx: TxReceiver,
	snapshot: watch::Sender<IdleSnapshot>,
	scheduler: IdleScheduler,
}

impl EditorView {
	/// Mounts a view and starts its idle scheduler on the current runtime.
	pub fn mount(engine: Arc<Placeholder>, doc: Document, selection: Selection) -> Result<Self, SpawnError> {
		let state = EditorState::new(doc, selection, &engine, Instant::now());
		let (tx, rx) = mpsc::unbounded_channel();
		let (snapshot, probe) = watch::channel(snapshot_of(&state));
		let scheduler = IdleScheduler::start(engine.options(), probe, tx.clone())?;
		tracing::debug!(
			doc_version = state.doc().version(),
			content_size = state.doc().content_size(),
			"editor.view.mount"
		);
		Ok(Self {
			state,
			engine,
			tx,
			rx,
			snapshot,
			scheduler,
		})
	}

	pub fn state(&self) -> &EditorState {
		&self.state
	}

	pub fn engine(&self) -> &Placeholder {
		&self.engine
	}

	pub fn dispatcher(&self) -> Dispatcher {
		Dispatcher { tx: self.tx.clone() }
	}

	/// Queues `tr` for application.
	pub fn dispatch(&self, tr: Transaction) -> Result<(), DispatchError> {
		self.tx.send(tr)?;
		Ok(())
	}

	/// Applies every queued transaction without waiting. Returns how many
	/// were applied.
	pub fn drain(&mut self) -> usize {
		let mut applied = 0;
		while let Ok(tr) = self.rx.try_recv() {
			applied += usize::from(self.apply(&tr));
		}
		applied
	}

	/// Waits for the next transaction and applies it. Returns false when it
	/// was rejected.
	pub async fn next(&mut self) -> bool {
		// The view holds a sender, so the channel cannot close underneath it.
		match self.rx.recv().await {
			Some(tr) => self.apply(&tr),
			None => false,
		}
	}

	/// Decorations for the current state.
	pub fn decorations(&self) -> DecorationSet {
		self.engine
			.decorations(self.state.doc(), self.state.selection(), self.state.placeholder())
	}

	/// True while the idle scheduler is running.
	pub fn is_scheduler_running(&self) -> bool {
		self.scheduler.is_running()
	}

	/// Stops the scheduler and releases the view.
	pub async fn destroy(self) -> TaskExit {
		let exit = self.scheduler.stop().await;
		tracing::debug!(?exit, "editor.view.destroy");
		exit
	}

	fn apply(&mut self, tr: &Transaction) -> bool {
		match self.state.apply(tr, &self.engine, Instant::now()) {
			Ok(next) => {
				self.state = next;
				self.snapshot.send_replace(snapshot_of(&self.state));
				true
			}
			Err(err) => {
				tracing::warn!(%err, steps = tr.steps().len(), "editor.view.transaction_rejected");
				false
			}
		}
	}
}

fn snapshot_of(state: &EditorState) -> IdleSnapshot {
	IdleSnapshot {
		last_input: state.placeholder().last_input(),
		input_seq: state.placeholder().input_seq(),
		is_idle: state.placeholder().is_idle(),
	}
}

//! Pause detection.
//!
//! The [`IdleScheduler`] polls a read-only [`IdleSnapshot`] of the view on a
//! fixed interval. When the user has paused longer than the threshold it
//! submits one idle trigger through a [`TriggerSink`]. It never touches
//! placeholder state itself: the trigger is applied by the view, in order with
//! every other transaction.
//!
//! The snapshot can lag behind input that is queued but not yet applied, so
//! each trigger is stamped with the input sequence number it was based on.
//! The reducer drops triggers whose stamp is out of date.

use std::time::Duration;

use quill_config::PlaceholderOptions;
use quill_primitives::Transaction;
use quill_worker::{ScopedTask, SpawnError, TaskClass, TaskExit};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};

use crate::idle_trigger_for;

/// What the scheduler needs to know about the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleSnapshot {
	pub last_input: Instant,
	pub input_seq: u64,
	pub is_idle: bool,
}

/// Read side of the view's idle snapshot.
pub trait IdleProbe: Send + 'static {
	fn snapshot(&self) -> IdleSnapshot;
}

impl IdleProbe for watch::Receiver<IdleSnapshot> {
	fn snapshot(&self) -> IdleSnapshot {
		*self.borrow()
	}
}

/// The dispatch channel has been closed by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("trigger sink closed")]
pub struct SinkClosed;

/// Where idle triggers are submitted.
pub trait TriggerSink: Send + 'static {
	/// Submits a trigger for the pause following input `input_seq`.
	fn submit(&self, input_seq: u64) -> Result<(), SinkClosed>;
}

impl TriggerSink for mpsc::UnboundedSender<Transaction> {
	fn submit(&self, input_seq: u64) -> Result<(), SinkClosed> {
		self.send(idle_trigger_for(input_seq)).map_err(|_| SinkClosed)
	}
}

/// Decides on each tick whether a trigger is due.
///
/// Fires at most once per pause: a pause is identified by its
/// `last_input` timestamp.
#[derive(Debug, Clone)]
pub struct IdleDetector {
	threshold: Duration,
	fired_for: Option<Instant>,
}

impl IdleDetector {
	pub fn new(threshold: Duration) -> Self {
		Self {
			threshold,
			fired_for: None,
		}
	}

	/// Returns true when a trigger should be submitted at `now`.
	pub fn poll(&mut self, snapshot: IdleSnapshot, now: Instant) -> bool {
		if snapshot.is_idle || self.fired_for == Some(snapshot.last_input) {
			return false;
		}
		if now.saturating_duration_since(snapshot.last_input) <= self.threshold {
			return false;
		}
		self.fired_for = Some(snapshot.last_input);
		true
	}
}

/// Handle to a running pause detector. Dropping it stops the detector.
#[derive(Debug)]
pub struct IdleScheduler {
	task: ScopedTask,
}

impl IdleScheduler {
	/// Starts polling `probe` every `options.tick_interval` on the current
	/// runtime.
	pub fn start<P, S>(options: &PlaceholderOptions, probe: P, sink: S) -> Result<Self, SpawnError>
	where
		P: IdleProbe,
		S: TriggerSink,
	{
		let tick = options.tick_interval;
		let threshold = options.pause_threshold;
		let task = ScopedTask::spawn(TaskClass::Background, "placeholder.idle", move |cancel| async move {
			let mut detector = IdleDetector::new(threshold);
			let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
			interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
			loop {
				tokio::select! {
					biased;
					() = cancel.cancelled() => break,
					now = interval.tick() => {
						let snapshot = probe.snapshot();
						if !detector.poll(snapshot, now) {
							continue;
						}
						if sink.submit(snapshot.input_seq).is_err() {
							tracing::debug!("placeholder.idle.sink_closed");
							break;
						}
						tracing::trace!(input_seq = snapshot.input_seq, "placeholder.idle.trigger");
					}
				}
			}
		})?;
		Ok(Self { task })
	}

	/// True until the task has stopped.
	pub fn is_running(&self) -> bool {
		!self.task.is_finished()
	}

	/// Cancels the detector and waits for it to exit.
	pub async fn stop(self) -> TaskExit {
		self.task.stop().await
	}
}

#[cfg(test)]
mod tests;

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::TaskClass;
use crate::spawn::{SpawnError, join_error_panic_message, spawn};

/// How a scoped task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskExit {
	/// The task returned, on its own or after observing cancellation.
	Finished,
	/// The task was aborted before it returned.
	Aborted,
	/// The task panicked.
	Panicked(String),
}

/// A spawned task whose lifetime is bound to its owner.
///
/// The task receives a [`CancellationToken`] it is expected to observe.
/// [`ScopedTask::stop`] cancels and joins; dropping the handle cancels and
/// aborts, so no task outlives its owner on any exit path.
#[derive(Debug)]
pub struct ScopedTask {
	name: &'static str,
	class: TaskClass,
	cancel: CancellationToken,
	handle: Option<JoinHandle<()>>,
}

impl ScopedTask {
	/// Spawns `task` on the current runtime.
	pub fn spawn<F, Fut>(class: TaskClass, name: &'static str, task: F) -> Result<Self, SpawnError>
	where
		F: FnOnce(CancellationToken) -> Fut,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let cancel = CancellationToken::new();
		let handle = spawn(class, task(cancel.clone()))?;
		tracing::debug!(task = name, worker_class = class.as_str(), "worker.scoped.start");
		Ok(Self {
			name,
			class,
			cancel,
			handle: Some(handle),
		})
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns true once the task has returned or been aborted.
	pub fn is_finished(&self) -> bool {
		self.handle.as_ref().is_none_or(JoinHandle::is_finished)
	}

	/// Returns true once cancellation has been requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation and waits for the task to end.
	pub async fn stop(mut self) -> TaskExit {
		self.cancel.cancel();
		let Some(handle) = self.handle.take() else {
			return TaskExit::Finished;
		};
		let exit = match handle.await {
			Ok(()) => TaskExit::Finished,
			Err(err) => match join_error_panic_message(err) {
				Some(msg) => TaskExit::Panicked(msg),
				None => TaskExit::Aborted,
			},
		};
		tracing::debug!(task = self.name, worker_class = self.class.as_str(), ?exit, "worker.scoped.stop");
		exit
	}
}

impl Drop for ScopedTask {
	fn drop(&mut self) {
		self.cancel.cancel();
		if let Some(handle) = self.handle.take() {
			handle.abort();
			tracing::trace!(task = self.name, worker_class = self.class.as_str(), "worker.scoped.drop");
		}
	}
}

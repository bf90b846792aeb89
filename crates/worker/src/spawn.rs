use std::future::Future;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::TaskClass;

/// Errors raised when a task cannot be started.
#[derive(Debug, Error)]
pub enum SpawnError {
	/// Called outside a Tokio runtime context.
	#[error("no tokio runtime is active on this thread")]
	NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Spawns an async task on the current runtime with classification metadata.
pub fn spawn<F>(class: TaskClass, fut: F) -> Result<JoinHandle<F::Output>, SpawnError>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let handle = tokio::runtime::Handle::try_current()?;
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	Ok(handle.spawn(fut))
}

/// Extracts the panic message from a failed join, if the task panicked.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	let payload = err.into_panic();
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return Some((*msg).to_owned());
	}
	if let Some(msg) = payload.downcast_ref::<String>() {
		return Some(msg.clone());
	}
	Some("task panicked with a non-string payload".to_owned())
}

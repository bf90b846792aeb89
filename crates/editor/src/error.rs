use quill_primitives::Transaction;
use tokio::sync::mpsc::error::SendError;

/// Errors returned when submitting transactions to a view.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	/// The view owning the channel has been destroyed.
	#[error("view closed")]
	ViewClosed,
}

impl From<SendError<Transaction>> for DispatchError {
	fn from(_: SendError<Transaction>) -> Self {
		Self::ViewClosed
	}
}

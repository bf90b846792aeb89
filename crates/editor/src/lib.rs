#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Editor integration for the placeholder engine.
//!
//! # Main Types
//!
//! - [`EditorState`] - Document, selection and placeholder state snapshot
//! - [`EditorView`] - A mounted view owning its state, transaction channel and idle scheduler
//! - [`Dispatcher`] - Cloneable handle for submitting transactions
//!
//! # Architecture
//!
//! ```text
//! EditorView
//! ├── state: EditorState        // doc + selection + PlaceholderState
//! ├── rx: TxReceiver            // one ordered channel for all transactions
//! ├── snapshot: watch::Sender   // read by the idle scheduler
//! └── scheduler: IdleScheduler  // stopped with the view
//! ```

mod error;
pub mod state;
pub mod view;

pub use error::DispatchError;
pub use state::EditorState;
pub use view::{Dispatcher, EditorView, TxReceiver, TxSender};

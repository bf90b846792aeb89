//! Task spawning primitives with lifetime-scoped cancellation.

mod class;
mod scoped;
mod spawn;


pub use class::TaskClass;
pub use scoped::{ScopedTask, TaskExit};
pub use spawn::{SpawnError, join_error_panic_message, spawn};
pub use tokio_util::sync::CancellationToken;

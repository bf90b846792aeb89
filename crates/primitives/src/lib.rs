//! Core types for structured documents: nodes, positions, selections and transactions.

/// Immutable document snapshots and position lookup.
pub mod document;
/// Document tree nodes and node kinds.
pub mod node;
/// Line-based outline syntax for seeding documents.
pub mod outline;
/// Anchor/head selections.
pub mod selection;
/// Step-based transactions and metadata.
pub mod transaction;

pub use document::{Document, DocumentError, ResolvedPos};
pub use node::{Node, NodeKind};
pub use outline::parse_outline;
pub use selection::Selection;
pub use transaction::{Meta, MetaValue, Step, StepError, Transaction};

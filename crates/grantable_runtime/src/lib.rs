//! Descriptor loading, reward bookkeeping, and the REPL for grantables.
//!
//! This crate provides:
//! - [`RewardLoader`] - Loading descriptors with skip-or-abort failure handling
//! - [`RewardManager`] - Per-recipient reward lists granted once
//! - [`MemoryBackend`] - In-memory implementations of every capability
//! - [`Repl`] - Interactive read-eval-print loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod loader;
pub mod memory;
pub mod repl;
pub mod rewards;
pub mod session;

pub use config::{FailurePolicy, InventoryConfig, LoaderConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use loader::{LoadFailure, LoadReport, RewardLoader, describe_stacks, join_lines};
pub use memory::MemoryBackend;
pub use repl::{Repl, Reply};
pub use rewards::{GrantOutcome, RewardManager};
pub use session::{Action, Session};

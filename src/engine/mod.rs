//! The state-transition engine.
//!
//! - [`TransitionTable`]: compiled (state, event) → target lookup
//! - [`ContextStore`]: per-state private context plus write-once global
//! - Watcher registry: entry/exit callbacks addressed by [`WatchHandle`]
//! - [`Machine`]: runs transitions and dispatches notifications
//!
//! Transitions are flat and unconditional: given the current state and an
//! event there is at most one target, and no guards are evaluated.

mod context;
mod error;
mod machine;
mod options;
mod registry;
mod table;

pub use context::{ContextStore, GlobalWrite};
pub use error::{MachineError, WatchPhase, WatcherError};
pub use machine::{Machine, Outcome};
pub use options::{InvalidTransitionPolicy, MachineOptions, DEFAULT_CHAIN_LIMIT};
pub use registry::{FollowUp, Notice, Outbox, WatchHandle, WatchTarget, Watcher};
pub use table::TransitionTable;

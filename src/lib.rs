//! Flowstate: a flat, event-driven state machine
//!
//! A machine is a finite set of named states and the events that move
//! between them. Each state can carry a private context value, and the
//! machine carries one global context that can be set exactly once.
//! Observers watch state entries and exits; everything else (UI bindings,
//! persistence, visualization) is layered on top of those hooks and the
//! XState-compatible export.
//!
//! # Core Concepts
//!
//! - **Definition**: a pure function returning state declarations; the first
//!   one is the initial state
//! - **Transition table**: compiled once, (state, event) → target
//! - **Context**: per-state private data, optionally cleared on exit, plus a
//!   write-once global value
//! - **Watchers**: synchronous entry/exit callbacks addressed by handle
//!
//! # Example
//!
//! ```rust
//! use flowstate::{create_machine, states, Outcome};
//!
//! let mut machine = create_machine("editor", || {
//!     states! {
//!         idle { EDIT => editing },
//!         editing { SAVE => saving },
//!         saving (clear_on_exit = true) {
//!             SUCCESS => idle,
//!             FAILURE => editing,
//!         },
//!     }
//! })
//! .unwrap();
//!
//! let entered = machine.watch_entry("saving", |notice, _outbox| {
//!     println!("saving via {}", notice.event);
//!     Ok(())
//! });
//!
//! machine.transition("EDIT", None).unwrap();
//! let outcome = machine.transition("SAVE", None).unwrap();
//! assert!(outcome.is_moved());
//!
//! // Not modeled from "saving": ignored, no state change.
//! let outcome = machine.transition("EDIT", None).unwrap();
//! assert!(matches!(outcome, Outcome::Ignored { .. }));
//! assert_eq!(machine.current(), "saving");
//!
//! machine.unwatch(&entered);
//! ```

pub mod binding;
pub mod checkpoint;
pub mod core;
pub mod definition;
pub mod engine;
pub mod export;

// Re-export commonly used types
pub use binding::{bind, Binding, MachineView};
pub use checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
pub use crate::core::{EventName, StateHistory, StateName, TransitionRecord, WILDCARD};
pub use definition::{
    create_machine, create_machine_with, BuildError, DefinitionIssue, MachineBuilder, StateDecl,
    StateOptions,
};
pub use engine::{
    GlobalWrite, InvalidTransitionPolicy, Machine, MachineError, MachineOptions, Notice, Outbox,
    Outcome, WatchHandle, WatchTarget, WatcherError,
};
pub use export::XStateConfig;

//! Errors surfaced while driving a machine.

use crate::core::StateName;
use std::fmt;
use thiserror::Error;

/// Failure reported by a watcher callback.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl WatcherError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn other(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(error))
    }
}

/// Which side of a transition a watcher was attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchPhase {
    Entry,
    Exit,
}

impl fmt::Display for WatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => f.write_str("entry"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Errors returned by `Machine::transition`.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A watcher failed. Remaining watchers of that transition did not run.
    /// After an exit failure the machine is unchanged; after an entry
    /// failure it is already in `state`.
    #[error("{phase} watcher on '{state}' failed: {source}")]
    Watcher {
        state: StateName,
        phase: WatchPhase,
        #[source]
        source: WatcherError,
    },

    #[error("Follow-up transitions exceeded the chain limit of {limit}")]
    ChainLimitExceeded { limit: usize },
}

//! State declarations produced by a machine's description function.

use crate::core::{EventName, StateName};
use serde::{Deserialize, Serialize};

/// Per-state options, fixed at definition time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOptions {
    /// Discard this state's private context when the machine leaves it.
    #[serde(default)]
    pub clear_on_exit: bool,
}

/// One declared state: its name, outgoing edges and options.
///
/// Edges keep the order they were added in. When the same event appears
/// twice, the later target wins once the table is compiled.
///
/// # Example
///
/// ```
/// use flowstate::definition::StateDecl;
///
/// let saving = StateDecl::new("saving")
///     .on("SUCCESS", "idle")
///     .on("FAILURE", "editing")
///     .clear_on_exit(true);
///
/// assert_eq!(saving.transitions.len(), 2);
/// assert!(saving.options.clear_on_exit);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDecl {
    pub name: StateName,
    #[serde(default)]
    pub transitions: Vec<(EventName, StateName)>,
    #[serde(default)]
    pub options: StateOptions,
}

impl StateDecl {
    /// Declare a state with no edges and default options.
    pub fn new(name: impl Into<StateName>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
            options: StateOptions::default(),
        }
    }

    /// Add an outgoing edge taken on `event`.
    pub fn on(mut self, event: impl Into<EventName>, target: impl Into<StateName>) -> Self {
        self.transitions.push((event.into(), target.into()));
        self
    }

    /// Set the static clear-on-exit option.
    pub fn clear_on_exit(mut self, clear: bool) -> Self {
        self.options.clear_on_exit = clear;
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: StateOptions) -> Self {
        self.options = options;
        self
    }
}

//! The machine: current state, transitions, contexts and watchers.

use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::core::{EventName, StateHistory, StateName, TransitionRecord};
use crate::engine::context::{ContextStore, GlobalWrite};
use crate::engine::error::{MachineError, WatchPhase, WatcherError};
use crate::engine::options::{InvalidTransitionPolicy, MachineOptions};
use crate::engine::registry::{fire, Notice, Outbox, WatchHandle, WatchRegistry, WatchTarget};
use crate::engine::table::TransitionTable;
use crate::export::XStateConfig;
use chrono::Utc;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use uuid::Uuid;

/// Result of a single `transition` call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The event was modeled; the machine moved.
    Moved {
        from: StateName,
        event: EventName,
        to: StateName,
    },

    /// The event has no transition from `state`; nothing changed.
    Ignored { state: StateName, event: EventName },
}

impl Outcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// A flat, event-driven state machine.
///
/// `C` is the private (per-state) context type and `G` the global context
/// type; both default to `serde_json::Value`.
///
/// # Execution model
///
/// Everything runs synchronously on the caller's thread. `transition` takes
/// `&mut self`, so a watcher can never re-enter the machine directly; it
/// queues follow-up events on its [`Outbox`] instead, and they run in FIFO
/// order after the current transition and all of its watchers complete.
///
/// A watcher error is returned to the caller unchanged and stops the
/// remaining watchers of that transition. Queued follow-ups are dropped.
///
/// The machine has no internal locking. Hosts sharing one across threads
/// wrap it in a mutex.
///
/// # Example
///
/// ```
/// use flowstate::{create_machine, states};
/// use serde_json::json;
///
/// let mut machine = create_machine("editor", || {
///     states! {
///         idle { EDIT => editing },
///         editing { SAVE => saving },
///         saving { SUCCESS => idle, FAILURE => editing },
///     }
/// })
/// .unwrap();
///
/// assert!(!machine.can("idle", "SAVE"));
/// machine.transition("EDIT", Some(json!({"text": "hello"}))).unwrap();
/// assert_eq!(machine.current(), "editing");
/// assert_eq!(machine.get_context("editing"), Some(&json!({"text": "hello"})));
/// ```
pub struct Machine<C = Value, G = Value> {
    id: String,
    instance: Uuid,
    table: TransitionTable,
    store: ContextStore<C, G>,
    registry: WatchRegistry<C, G>,
    clear_overrides: HashMap<EventName, bool>,
    history: StateHistory,
    current: StateName,
    options: MachineOptions,
}

impl<C, G> Machine<C, G> {
    /// Create a machine in the table's initial state.
    ///
    /// `table` has already been validated by [`TransitionTable::compile`].
    pub fn new(id: impl Into<String>, table: TransitionTable, options: MachineOptions) -> Self {
        let instance = Uuid::new_v4();
        let current = table.initial().clone();
        Self {
            id: id.into(),
            instance,
            table,
            store: ContextStore::new(),
            registry: WatchRegistry::new(instance),
            clear_overrides: HashMap::new(),
            history: StateHistory::new(),
            current,
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current(&self) -> &StateName {
        &self.current
    }

    pub fn initial(&self) -> &StateName {
        self.table.initial()
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[StateName] {
        self.table.states()
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn options(&self) -> &MachineOptions {
        &self.options
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Whether `event` is modeled from `state`. Never fails.
    pub fn can(&self, state: &str, event: &str) -> bool {
        self.table.can(state, event)
    }

    /// Fire `event` from the current state.
    ///
    /// On a modeled event: exit watchers of the current state run, its
    /// private context is cleared if the event's override (or else the
    /// state's `clear_on_exit`) says so, `context` is written for the target
    /// state, the machine moves, and entry watchers of the target run
    /// followed by the wildcard entry watchers. Follow-ups queued by
    /// watchers then run, each as a full transition.
    ///
    /// An unmodeled event returns [`Outcome::Ignored`] and is reported per
    /// [`InvalidTransitionPolicy`].
    pub fn transition(
        &mut self,
        event: impl Into<EventName>,
        context: Option<C>,
    ) -> Result<Outcome, MachineError> {
        let mut outbox = Outbox::new();
        let outcome = self.step(event.into(), context, &mut outbox)?;

        let mut pending: VecDeque<_> = outbox.into_requests().into();
        let mut chained = 0;
        while let Some(follow_up) = pending.pop_front() {
            if chained == self.options.chain_limit {
                tracing::warn!(
                    machine = %self.id,
                    state = %self.current,
                    limit = self.options.chain_limit,
                    "follow-up chain limit reached; dropping remaining events"
                );
                return Err(MachineError::ChainLimitExceeded {
                    limit: self.options.chain_limit,
                });
            }
            chained += 1;

            tracing::debug!(machine = %self.id, event = %follow_up.event, "running follow-up transition");
            let mut outbox = Outbox::new();
            self.step(follow_up.event, follow_up.context, &mut outbox)?;
            pending.extend(outbox.into_requests());
        }

        Ok(outcome)
    }

    fn step(
        &mut self,
        event: EventName,
        context: Option<C>,
        outbox: &mut Outbox<C>,
    ) -> Result<Outcome, MachineError> {
        let Some(target) = self.table.lookup(&self.current, &event).cloned() else {
            if self.options.invalid_transitions == InvalidTransitionPolicy::Warn {
                tracing::warn!(
                    machine = %self.id,
                    state = %self.current,
                    event = %event,
                    "no transition for event from current state; ignoring"
                );
            }
            return Ok(Outcome::Ignored {
                state: self.current.clone(),
                event,
            });
        };
        let from = self.current.clone();

        let notice = Notice {
            state: &from,
            event: &event,
            context: self.store.get(&from),
            global: self.store.global(),
        };
        fire(self.registry.exit_watchers(&from), &notice, outbox)
            .map_err(|source| watcher_failed(&from, WatchPhase::Exit, source))?;

        let should_clear = self
            .clear_overrides
            .get(&event)
            .copied()
            .unwrap_or_else(|| self.table.options(&from).clear_on_exit);
        if should_clear {
            self.store.clear(&from);
        }
        if let Some(context) = context {
            self.store.set(target.clone(), context);
        }

        self.current = target.clone();
        self.history = std::mem::take(&mut self.history).record(TransitionRecord {
            from: from.clone(),
            event: event.clone(),
            to: target.clone(),
            timestamp: Utc::now(),
        });
        self.trim_history();
        tracing::debug!(machine = %self.id, from = %from, event = %event, to = %target, "transition");

        let notice = Notice {
            state: &target,
            event: &event,
            context: self.store.get(&target),
            global: self.store.global(),
        };
        fire(self.registry.entry_watchers(&target), &notice, outbox)
            .map_err(|source| watcher_failed(&target, WatchPhase::Entry, source))?;
        fire(self.registry.any_entry_watchers(), &notice, outbox)
            .map_err(|source| watcher_failed(&target, WatchPhase::Entry, source))?;

        Ok(Outcome::Moved {
            from,
            event,
            to: target,
        })
    }

    /// Set the global context. Only the first call has any effect; later
    /// calls are rejected with a warning and the original is kept.
    pub fn set_global_only(&mut self, context: G) -> GlobalWrite {
        let write = self.store.set_global_once(context);
        if write == GlobalWrite::Rejected {
            tracing::warn!(machine = %self.id, "global context already set; keeping the original");
        }
        write
    }

    pub fn global_context(&self) -> Option<&G> {
        self.store.global()
    }

    /// Private context of `state`, if set.
    pub fn get_context(&self, state: &str) -> Option<&C> {
        self.store.get(state)
    }

    /// Private context of the current state, if set.
    pub fn current_context(&self) -> Option<&C> {
        self.store.get(&self.current)
    }

    /// Write `state`'s private context directly, without firing watchers or
    /// applying clear-on-exit. Meant for seeding and tests.
    ///
    /// Returns false, dropping the value, when `state` is not declared.
    pub fn set_context(&mut self, state: &str, context: C) -> bool {
        if !self.table.contains(state) {
            tracing::warn!(machine = %self.id, state, "cannot set context of an undeclared state");
            return false;
        }
        self.store.set(state, context);
        true
    }

    /// Remove `state`'s private context directly.
    pub fn clear_context(&mut self, state: &str) -> Option<C> {
        self.store.clear(state)
    }

    /// Override clear-on-exit for every exit triggered by `event`, whatever
    /// state it fires from. Lasts for the machine's lifetime; calling again
    /// replaces the previous value.
    pub fn set_clear_context_on_exit(&mut self, event: impl Into<EventName>, clear: bool) {
        self.clear_overrides.insert(event.into(), clear);
    }

    /// Watch entries into a state, or into any state with `"*"`.
    pub fn watch_entry<F>(&mut self, target: impl Into<WatchTarget>, watcher: F) -> WatchHandle
    where
        F: FnMut(&Notice<'_, C, G>, &mut Outbox<C>) -> Result<(), WatcherError> + Send + 'static,
    {
        let target = target.into();
        if let WatchTarget::State(state) = &target {
            self.warn_if_undeclared(state);
        }
        self.registry.watch_entry(target, Box::new(watcher))
    }

    /// Watch exits from a state.
    pub fn watch_exit<F>(&mut self, state: impl Into<StateName>, watcher: F) -> WatchHandle
    where
        F: FnMut(&Notice<'_, C, G>, &mut Outbox<C>) -> Result<(), WatcherError> + Send + 'static,
    {
        let state = state.into();
        self.warn_if_undeclared(&state);
        self.registry.watch_exit(state, Box::new(watcher))
    }

    /// Remove the single watcher behind `handle`. Returns false when it was
    /// already removed or belongs to another machine.
    pub fn unwatch(&mut self, handle: &WatchHandle) -> bool {
        self.registry.unwatch(handle)
    }

    /// Number of registered watchers across all states.
    pub fn watcher_count(&self) -> usize {
        self.registry.len()
    }

    /// XState-compatible description of the transition table.
    pub fn to_xstate(&self) -> XStateConfig {
        XStateConfig::from_table(&self.id, &self.table)
    }

    /// `{ id, initial, states: { name: { on: { event: target } } } }`.
    pub fn to_xstate_json(&self) -> Value {
        self.to_xstate().to_value()
    }

    /// Forget every recorded transition.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.options.history_limit {
            self.history.trim_to(limit);
        }
    }

    /// Replace current state, contexts and history from a checkpoint.
    ///
    /// No watchers fire. Clear-on-exit overrides and watchers are kept as
    /// they are. The global context stays write-once: the checkpoint's value
    /// is adopted only when none is set yet, otherwise the existing one is
    /// kept and the checkpoint's is dropped with a warning.
    pub fn restore(&mut self, checkpoint: Checkpoint<C, G>) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.machine_id != self.id {
            return Err(CheckpointError::MachineMismatch {
                expected: self.id.clone(),
                found: checkpoint.machine_id,
            });
        }
        if let Some(state) = std::iter::once(&checkpoint.current)
            .chain(checkpoint.contexts.keys())
            .find(|state| !self.table.contains(state))
        {
            return Err(CheckpointError::UndeclaredState {
                state: state.clone(),
            });
        }

        tracing::debug!(machine = %self.id, checkpoint = %checkpoint.id, state = %checkpoint.current, "restoring checkpoint");
        self.current = checkpoint.current;
        self.store.replace_private(checkpoint.contexts);
        if let Some(global) = checkpoint.global {
            if self.store.set_global_once(global) == GlobalWrite::Rejected {
                tracing::warn!(
                    machine = %self.id,
                    checkpoint = %checkpoint.id,
                    "global context already set; ignoring the checkpoint's value"
                );
            }
        }
        self.history = checkpoint.history;
        self.trim_history();
        Ok(())
    }

    fn warn_if_undeclared(&self, state: &StateName) {
        if !self.table.contains(state) {
            tracing::warn!(machine = %self.id, state = %state, "watching a state the machine does not declare");
        }
    }
}

impl<C: Clone, G: Clone> Machine<C, G> {
    /// Snapshot current state, contexts, global context and history.
    pub fn checkpoint(&self) -> Checkpoint<C, G> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine_id: self.id.clone(),
            current: self.current.clone(),
            contexts: self.store.entries().clone(),
            global: self.store.global().cloned(),
            history: self.history.clone(),
        }
    }
}

impl<C, G> fmt::Debug for Machine<C, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("states", &self.table.states())
            .field("watchers", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn watcher_failed(state: &StateName, phase: WatchPhase, source: WatcherError) -> MachineError {
    MachineError::Watcher {
        state: state.clone(),
        phase,
        source,
    }
}

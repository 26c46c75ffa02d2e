//! Entry and exit watcher registry.
//!
//! Watchers are stored per state in registration order. Subscribing returns
//! a [`WatchHandle`] that identifies exactly one callback; redeeming it
//! removes that callback and nothing else.

use crate::core::{EventName, StateName, WILDCARD};
use crate::engine::error::WatcherError;
use std::collections::HashMap;
use uuid::Uuid;

/// What a watcher sees when it fires.
#[derive(Debug)]
pub struct Notice<'a, C, G> {
    /// The state being exited (exit watchers) or entered (entry watchers).
    pub state: &'a StateName,
    /// The event that triggered the transition.
    pub event: &'a EventName,
    /// Private context of `state` at the time of the call.
    pub context: Option<&'a C>,
    pub global: Option<&'a G>,
}

/// A transition requested by a watcher, run after the current one finishes.
#[derive(Debug)]
pub struct FollowUp<C> {
    pub event: EventName,
    pub context: Option<C>,
}

/// Queue of follow-up transitions handed to every watcher.
///
/// Watchers cannot borrow the machine they observe. To drive it further they
/// push events here; the machine runs them in FIFO order once the current
/// transition, including all of its watchers, has completed.
#[derive(Debug)]
pub struct Outbox<C> {
    requests: Vec<FollowUp<C>>,
}

impl<C> Outbox<C> {
    pub(crate) fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Queue `event` without context for the target state.
    pub fn send(&mut self, event: impl Into<EventName>) {
        self.requests.push(FollowUp {
            event: event.into(),
            context: None,
        });
    }

    /// Queue `event`, writing `context` into the state it leads to.
    pub fn send_with(&mut self, event: impl Into<EventName>, context: C) {
        self.requests.push(FollowUp {
            event: event.into(),
            context: Some(context),
        });
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn into_requests(self) -> Vec<FollowUp<C>> {
        self.requests
    }
}

/// Boxed watcher callback.
pub type Watcher<C, G> =
    Box<dyn FnMut(&Notice<'_, C, G>, &mut Outbox<C>) -> Result<(), WatcherError> + Send>;

/// Where an entry watcher listens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WatchTarget {
    State(StateName),
    /// Every state entry, after that state's own entry watchers.
    AnyState,
}

impl From<StateName> for WatchTarget {
    fn from(state: StateName) -> Self {
        if state.is_wildcard() {
            Self::AnyState
        } else {
            Self::State(state)
        }
    }
}

impl From<&str> for WatchTarget {
    fn from(state: &str) -> Self {
        if state == WILDCARD {
            Self::AnyState
        } else {
            Self::State(state.into())
        }
    }
}

impl From<String> for WatchTarget {
    fn from(state: String) -> Self {
        StateName::from(state).into()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Entry(StateName),
    AnyEntry,
    Exit(StateName),
}

/// Opaque token for one registered watcher.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WatchHandle {
    machine: Uuid,
    id: u64,
    slot: Slot,
}

pub(crate) struct Registered<C, G> {
    id: u64,
    watcher: Watcher<C, G>,
}

pub(crate) struct WatchRegistry<C, G> {
    instance: Uuid,
    next_id: u64,
    entry: HashMap<StateName, Vec<Registered<C, G>>>,
    any_entry: Vec<Registered<C, G>>,
    exit: HashMap<StateName, Vec<Registered<C, G>>>,
}

impl<C, G> WatchRegistry<C, G> {
    pub(crate) fn new(instance: Uuid) -> Self {
        Self {
            instance,
            next_id: 0,
            entry: HashMap::new(),
            any_entry: Vec::new(),
            exit: HashMap::new(),
        }
    }

    pub(crate) fn watch_entry(&mut self, target: WatchTarget, watcher: Watcher<C, G>) -> WatchHandle {
        let id = self.allocate();
        let registered = Registered { id, watcher };
        let slot = match target {
            WatchTarget::State(state) => {
                self.entry.entry(state.clone()).or_default().push(registered);
                Slot::Entry(state)
            }
            WatchTarget::AnyState => {
                self.any_entry.push(registered);
                Slot::AnyEntry
            }
        };
        self.handle(id, slot)
    }

    pub(crate) fn watch_exit(&mut self, state: StateName, watcher: Watcher<C, G>) -> WatchHandle {
        let id = self.allocate();
        self.exit
            .entry(state.clone())
            .or_default()
            .push(Registered { id, watcher });
        self.handle(id, Slot::Exit(state))
    }

    /// Remove the one watcher behind `handle`. False if it is already gone
    /// or the handle belongs to another machine.
    pub(crate) fn unwatch(&mut self, handle: &WatchHandle) -> bool {
        if handle.machine != self.instance {
            return false;
        }
        match &handle.slot {
            Slot::Entry(state) => remove_keyed(&mut self.entry, state, handle.id),
            Slot::Exit(state) => remove_keyed(&mut self.exit, state, handle.id),
            Slot::AnyEntry => remove(&mut self.any_entry, handle.id),
        }
    }

    pub(crate) fn entry_watchers(&mut self, state: &str) -> &mut [Registered<C, G>] {
        match self.entry.get_mut(state) {
            Some(list) => list.as_mut_slice(),
            None => &mut [],
        }
    }

    pub(crate) fn any_entry_watchers(&mut self) -> &mut [Registered<C, G>] {
        &mut self.any_entry
    }

    pub(crate) fn exit_watchers(&mut self, state: &str) -> &mut [Registered<C, G>] {
        match self.exit.get_mut(state) {
            Some(list) => list.as_mut_slice(),
            None => &mut [],
        }
    }

    pub(crate) fn len(&self) -> usize {
        let keyed: usize = self.entry.values().chain(self.exit.values()).map(Vec::len).sum();
        keyed + self.any_entry.len()
    }

    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn handle(&self, id: u64, slot: Slot) -> WatchHandle {
        WatchHandle {
            machine: self.instance,
            id,
            slot,
        }
    }
}

fn remove<C, G>(list: &mut Vec<Registered<C, G>>, id: u64) -> bool {
    match list.iter().position(|registered| registered.id == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

fn remove_keyed<C, G>(
    lists: &mut HashMap<StateName, Vec<Registered<C, G>>>,
    state: &StateName,
    id: u64,
) -> bool {
    let Some(list) = lists.get_mut(state) else {
        return false;
    };
    let removed = remove(list, id);
    if list.is_empty() {
        lists.remove(state);
    }
    removed
}

/// Call each watcher in registration order, stopping at the first error.
pub(crate) fn fire<C, G>(
    watchers: &mut [Registered<C, G>],
    notice: &Notice<'_, C, G>,
    outbox: &mut Outbox<C>,
) -> Result<(), WatcherError> {
    for registered in watchers {
        (registered.watcher)(notice, outbox)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn boxed<F>(f: F) -> Watcher<(), ()>
    where
        F: FnMut(&Notice<'_, (), ()>, &mut Outbox<()>) -> Result<(), WatcherError> + Send + 'static,
    {
        Box::new(f)
    }

    fn recorder(log: &Log, label: &'static str) -> Watcher<(), ()> {
        let log = Arc::clone(log);
        boxed(move |_notice, _outbox| {
            log.lock().unwrap().push(label);
            Ok(())
        })
    }

    fn fire_entry(registry: &mut WatchRegistry<(), ()>, state: &str) {
        let name = StateName::from(state);
        let event = EventName::from("GO");
        let notice = Notice {
            state: &name,
            event: &event,
            context: None,
            global: None,
        };
        let mut outbox = Outbox::new();
        fire(registry.entry_watchers(state), &notice, &mut outbox).unwrap();
        fire(registry.any_entry_watchers(), &notice, &mut outbox).unwrap();
    }

    #[test]
    fn watchers_fire_in_registration_order() {
        let log: Log = Arc::default();
        let mut registry = WatchRegistry::new(Uuid::new_v4());
        registry.watch_entry("s".into(), recorder(&log, "w1"));
        registry.watch_entry("*".into(), recorder(&log, "any"));
        registry.watch_entry("s".into(), recorder(&log, "w2"));

        fire_entry(&mut registry, "s");

        assert_eq!(*log.lock().unwrap(), vec!["w1", "w2", "any"]);
    }

    #[test]
    fn unwatch_removes_exactly_one() {
        let log: Log = Arc::default();
        let mut registry = WatchRegistry::new(Uuid::new_v4());
        let first = registry.watch_entry("s".into(), recorder(&log, "w1"));
        registry.watch_entry("s".into(), recorder(&log, "w2"));

        assert!(registry.unwatch(&first));
        fire_entry(&mut registry, "s");

        assert_eq!(*log.lock().unwrap(), vec!["w2"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unwatch_is_idempotent() {
        let mut registry: WatchRegistry<(), ()> = WatchRegistry::new(Uuid::new_v4());
        let log: Log = Arc::default();
        let handle = registry.watch_exit("s".into(), recorder(&log, "exit"));

        assert!(registry.unwatch(&handle));
        assert!(!registry.unwatch(&handle));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn foreign_handles_are_ignored() {
        let log: Log = Arc::default();
        let mut first = WatchRegistry::new(Uuid::new_v4());
        let mut second = WatchRegistry::new(Uuid::new_v4());
        let handle = first.watch_entry("s".into(), recorder(&log, "first"));
        second.watch_entry("s".into(), recorder(&log, "second"));

        assert!(!second.unwatch(&handle));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn wildcard_target_parses_from_str() {
        assert_eq!(WatchTarget::from("*"), WatchTarget::AnyState);
        assert_eq!(
            WatchTarget::from("idle"),
            WatchTarget::State("idle".into())
        );
    }

    #[test]
    fn fire_stops_at_first_error() {
        let log: Log = Arc::default();
        let mut registry: WatchRegistry<(), ()> = WatchRegistry::new(Uuid::new_v4());
        registry.watch_entry(
            "s".into(),
            boxed(|_notice, _outbox| Err(WatcherError::msg("boom"))),
        );
        registry.watch_entry("s".into(), recorder(&log, "after"));

        let name = StateName::from("s");
        let event = EventName::from("GO");
        let notice = Notice {
            state: &name,
            event: &event,
            context: None,
            global: None,
        };
        let result = fire(registry.entry_watchers("s"), &notice, &mut Outbox::new());

        assert!(result.is_err());
        assert!(log.lock().unwrap().is_empty());
    }
}

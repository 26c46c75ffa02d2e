//! Private and global context storage.

use crate::core::StateName;
use std::collections::HashMap;

/// Result of a write to the global slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum GlobalWrite {
    /// First write; the value is now locked in.
    Stored,
    /// The slot was already set. The new value was dropped.
    Rejected,
}

/// One private slot per state plus a write-once global slot.
#[derive(Clone, Debug)]
pub struct ContextStore<C, G> {
    private: HashMap<StateName, C>,
    global: Option<G>,
}

impl<C, G> ContextStore<C, G> {
    pub fn new() -> Self {
        Self {
            private: HashMap::new(),
            global: None,
        }
    }

    /// Current private context of `state`, if set.
    pub fn get(&self, state: &str) -> Option<&C> {
        self.private.get(state)
    }

    /// Overwrite the private context of `state`, returning the old value.
    pub fn set(&mut self, state: impl Into<StateName>, value: C) -> Option<C> {
        self.private.insert(state.into(), value)
    }

    /// Remove the private context of `state`.
    pub fn clear(&mut self, state: &str) -> Option<C> {
        self.private.remove(state)
    }

    /// Store `value` as the global context unless one is already set.
    pub fn set_global_once(&mut self, value: G) -> GlobalWrite {
        if self.global.is_some() {
            return GlobalWrite::Rejected;
        }
        self.global = Some(value);
        GlobalWrite::Stored
    }

    pub fn global(&self) -> Option<&G> {
        self.global.as_ref()
    }

    /// All private contexts keyed by state.
    pub fn entries(&self) -> &HashMap<StateName, C> {
        &self.private
    }

    /// Replace every private slot. The global slot is untouched.
    pub(crate) fn replace_private(&mut self, private: HashMap<StateName, C>) {
        self.private = private;
    }
}

impl<C, G> Default for ContextStore<C, G> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn get_returns_unset_for_new_store() {
        let store: ContextStore<Value, Value> = ContextStore::new();
        assert!(store.get("idle").is_none());
        assert!(store.global().is_none());
    }

    #[test]
    fn set_overwrites_unconditionally() {
        let mut store: ContextStore<Value, Value> = ContextStore::new();
        assert_eq!(store.set("editing", json!({"draft": 1})), None);
        assert_eq!(
            store.set("editing", json!({"draft": 2})),
            Some(json!({"draft": 1}))
        );
        assert_eq!(store.get("editing"), Some(&json!({"draft": 2})));
    }

    #[test]
    fn clear_removes_value() {
        let mut store: ContextStore<i32, ()> = ContextStore::new();
        store.set("a", 7);
        assert_eq!(store.clear("a"), Some(7));
        assert!(store.get("a").is_none());
        assert_eq!(store.clear("a"), None);
    }

    #[test]
    fn global_is_write_once() {
        let mut store: ContextStore<(), &str> = ContextStore::new();
        assert_eq!(store.set_global_once("first"), GlobalWrite::Stored);
        assert_eq!(store.set_global_once("second"), GlobalWrite::Rejected);
        assert_eq!(store.global(), Some(&"first"));
    }
}

//! Compiled transition table.

use crate::core::{EventName, StateName};
use crate::definition::validate::validate;
use crate::definition::{BuildError, StateDecl, StateOptions};
use indexmap::IndexMap;
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Immutable (state, event) → target lookup, built once per machine.
///
/// Also owns the declared state order and each state's options, which are
/// fixed at the same time.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    order: Vec<StateName>,
    edges: HashMap<StateName, IndexMap<EventName, StateName>>,
    options: HashMap<StateName, StateOptions>,
}

impl TransitionTable {
    /// Validate declarations, then compile them in one pass over their edges.
    ///
    /// Every issue (duplicate state, reserved `*` name, undeclared target) is
    /// reported together. Duplicate (state, event) pairs are not an issue:
    /// the last one registered wins.
    pub fn compile(decls: impl IntoIterator<Item = StateDecl>) -> Result<Self, BuildError> {
        let decls: Vec<StateDecl> = decls.into_iter().collect();
        if decls.is_empty() {
            return Err(BuildError::EmptyMachine);
        }
        if let Validation::Failure(errors) = validate(&decls) {
            return Err(BuildError::InvalidDefinition {
                issues: errors.iter().cloned().collect(),
            });
        }

        let mut order = Vec::with_capacity(decls.len());
        let mut edges: HashMap<StateName, IndexMap<EventName, StateName>> = HashMap::new();
        let mut options = HashMap::new();

        for decl in decls {
            let outgoing = edges.entry(decl.name.clone()).or_default();
            for (event, target) in decl.transitions {
                outgoing.insert(event, target);
            }
            options.insert(decl.name.clone(), decl.options);
            order.push(decl.name);
        }

        Ok(Self {
            order,
            edges,
            options,
        })
    }

    /// The first declared state.
    pub fn initial(&self) -> &StateName {
        // compile() rejects an empty declaration list
        &self.order[0]
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[StateName] {
        &self.order
    }

    pub fn contains(&self, state: &str) -> bool {
        self.edges.contains_key(state)
    }

    /// Target for `event` fired from `state`, if modeled.
    pub fn lookup(&self, state: &str, event: &str) -> Option<&StateName> {
        self.edges.get(state).and_then(|outgoing| outgoing.get(event))
    }

    /// Whether `event` is modeled from `state`. False for unknown names.
    pub fn can(&self, state: &str, event: &str) -> bool {
        self.lookup(state, event).is_some()
    }

    /// Outgoing edges of `state`, in the order their events were first declared.
    pub fn events_from(&self, state: &str) -> impl Iterator<Item = (&EventName, &StateName)> {
        self.edges.get(state).into_iter().flat_map(|outgoing| outgoing.iter())
    }

    /// Options declared for `state`; defaults for unknown states.
    pub fn options(&self, state: &str) -> StateOptions {
        self.options.get(state).copied().unwrap_or_default()
    }

    /// Total number of distinct (state, event) edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Builder for constructing machines.

use crate::definition::decl::StateDecl;
use crate::definition::error::BuildError;
use crate::engine::{Machine, MachineOptions, TransitionTable};
use serde_json::Value;
use std::marker::PhantomData;

/// Builder for constructing machines with a fluent API.
///
/// `C` is the private context type, `G` the global context type. Both
/// default to `serde_json::Value`.
pub struct MachineBuilder<C = Value, G = Value> {
    id: String,
    states: Vec<StateDecl>,
    options: MachineOptions,
    _phantom: PhantomData<fn() -> (C, G)>,
}

impl<C, G> MachineBuilder<C, G> {
    /// Create a builder for the machine named `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            states: Vec::new(),
            options: MachineOptions::default(),
            _phantom: PhantomData,
        }
    }

    /// Declare a state. The first declared state is the initial state.
    pub fn state(mut self, decl: StateDecl) -> Self {
        self.states.push(decl);
        self
    }

    /// Declare several states, in order.
    pub fn states(mut self, decls: impl IntoIterator<Item = StateDecl>) -> Self {
        self.states.extend(decls);
        self
    }

    /// Set runtime options.
    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the declarations and compile the machine.
    pub fn build(self) -> Result<Machine<C, G>, BuildError> {
        let table = TransitionTable::compile(self.states)?;
        Ok(Machine::new(self.id, table, self.options))
    }
}

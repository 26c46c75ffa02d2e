//! Machine definitions.
//!
//! A machine is described by a pure function returning its state
//! declarations. Order matters: the first declared state is the initial
//! state. Declarations are validated, then compiled into an immutable
//! transition table.

pub mod builder;
pub mod decl;
pub mod error;
pub mod macros;
pub(crate) mod validate;

pub use builder::MachineBuilder;
pub use decl::{StateDecl, StateOptions};
pub use error::{BuildError, DefinitionIssue};

use crate::engine::{Machine, MachineOptions};

/// Create a machine from a description function, with default options.
///
/// # Example
///
/// ```
/// use flowstate::create_machine;
/// use flowstate::definition::StateDecl;
///
/// let machine = create_machine("toggle", || {
///     vec![
///         StateDecl::new("off").on("FLIP", "on"),
///         StateDecl::new("on").on("FLIP", "off"),
///     ]
/// })
/// .unwrap();
///
/// assert_eq!(machine.current(), "off");
/// ```
pub fn create_machine<F, I>(id: impl Into<String>, describe: F) -> Result<Machine, BuildError>
where
    F: FnOnce() -> I,
    I: IntoIterator<Item = StateDecl>,
{
    create_machine_with(id, MachineOptions::default(), describe)
}

/// Create a machine from a description function with explicit options.
pub fn create_machine_with<F, I>(
    id: impl Into<String>,
    options: MachineOptions,
    describe: F,
) -> Result<Machine, BuildError>
where
    F: FnOnce() -> I,
    I: IntoIterator<Item = StateDecl>,
{
    MachineBuilder::new(id)
        .states(describe())
        .options(options)
        .build()
}

//! Errors raised while building a machine from its declarations.

use crate::core::{EventName, StateName};
use thiserror::Error;

/// Errors that abort machine construction.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Machine declares no states. Declare at least one; the first becomes the initial state")]
    EmptyMachine,

    #[error("Invalid machine definition: {}", join_issues(.issues))]
    InvalidDefinition { issues: Vec<DefinitionIssue> },
}

/// A single problem found while validating declarations.
///
/// Validation collects every issue before failing, so one build attempt
/// reports all of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionIssue {
    #[error("state '{state}' is declared more than once")]
    DuplicateState { state: StateName },

    #[error("'*' is reserved for wildcard watchers and cannot name a state")]
    ReservedName,

    #[error("transition '{from}' --{event}--> '{to}' targets an undeclared state")]
    UnknownTarget {
        from: StateName,
        event: EventName,
        to: StateName,
    },
}

fn join_issues(issues: &[DefinitionIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Core value types shared by every other module.
//!
//! - State and event identifiers
//! - The transition history log
//!
//! Nothing in here knows about watchers or contexts.

mod history;
mod name;

pub use history::{StateHistory, TransitionRecord};
pub use name::{EventName, StateName, WILDCARD};

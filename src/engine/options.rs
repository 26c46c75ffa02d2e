//! Runtime options for a machine.

use serde::{Deserialize, Serialize};

/// How a machine reports an event that has no transition from the current
/// state. Either way the event is ignored and the state is unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTransitionPolicy {
    /// Ignore without any log output.
    #[default]
    Ignore,
    /// Ignore and emit a `warn`-level tracing event.
    Warn,
}

/// Options fixed when a machine is built.
///
/// Deserializable so hosts can keep them in their own config files; missing
/// fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    pub invalid_transitions: InvalidTransitionPolicy,
    /// Maximum follow-up transitions queued by watchers per `transition` call.
    pub chain_limit: usize,
    /// Keep at most this many history records, dropping the oldest.
    /// `None` keeps everything.
    pub history_limit: Option<usize>,
}

pub const DEFAULT_CHAIN_LIMIT: usize = 64;

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            invalid_transitions: InvalidTransitionPolicy::default(),
            chain_limit: DEFAULT_CHAIN_LIMIT,
            history_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_silent_with_bounded_chain() {
        let options = MachineOptions::default();
        assert_eq!(options.invalid_transitions, InvalidTransitionPolicy::Ignore);
        assert_eq!(options.chain_limit, DEFAULT_CHAIN_LIMIT);
        assert_eq!(options.history_limit, None);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let options: MachineOptions =
            serde_json::from_str(r#"{"invalid_transitions":"warn"}"#).unwrap();
        assert_eq!(options.invalid_transitions, InvalidTransitionPolicy::Warn);
        assert_eq!(options.chain_limit, DEFAULT_CHAIN_LIMIT);
        assert_eq!(options.history_limit, None);

        let options: MachineOptions = serde_json::from_str(r#"{"history_limit":100}"#).unwrap();
        assert_eq!(options.history_limit, Some(100));
    }
}

//! Transition history tracking.
//!
//! Every transition a machine executes is appended as a timestamped
//! [`TransitionRecord`]. The history is an ordered log; a machine may cap
//! it, in which case the oldest records are dropped first.

use super::name::{EventName, StateName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single executed transition.
///
/// # Example
///
/// ```rust
/// use flowstate::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle".into(),
///     event: "EDIT".into(),
///     to: "editing".into(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "editing");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was exited
    pub from: StateName,
    /// The event that triggered the transition
    pub event: EventName,
    /// The state that was entered
    pub to: StateName,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of executed transitions.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(TransitionRecord {
///         from: "idle".into(),
///         event: "EDIT".into(),
///         to: "editing".into(),
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: "editing".into(),
///         event: "SAVE".into(),
///         to: "saving".into(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.path();
/// assert_eq!(path.len(), 3); // idle -> editing -> saving
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<TransitionRecord>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition, returning the extended history.
    pub fn record(mut self, transition: TransitionRecord) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Drop the oldest records until at most `limit` remain.
    pub fn trim_to(&mut self, limit: usize) {
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// The states traversed: the first `from`, then the `to` of each record.
    ///
    /// After trimming, the path starts at the oldest retained record.
    pub fn path(&self) -> Vec<&StateName> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn record(from: &str, event: &str, to: &str, timestamp: DateTime<Utc>) -> TransitionRecord {
        TransitionRecord {
            from: from.into(),
            event: event.into(),
            to: to.into(),
            timestamp,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let now = Utc::now();
        let history = StateHistory::new()
            .record(record("idle", "EDIT", "editing", now))
            .record(record("editing", "SAVE", "saving", now));

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].event, "EDIT");
        assert_eq!(history.last().unwrap().to, "saving");
    }

    #[test]
    fn path_returns_state_sequence() {
        let now = Utc::now();
        let history = StateHistory::new()
            .record(record("idle", "EDIT", "editing", now))
            .record(record("editing", "SAVE", "saving", now))
            .record(record("saving", "SUCCESS", "idle", now));

        let path: Vec<&str> = history.path().iter().map(|s| s.as_str()).collect();
        assert_eq!(path, vec!["idle", "editing", "saving", "idle"]);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(record("a", "GO", "b", start))
            .record(record("b", "GO", "c", start + ChronoDuration::seconds(5)));

        assert_eq!(history.duration(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(record("a", "GO", "b", Utc::now()));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn trim_drops_oldest_records() {
        let now = Utc::now();
        let mut history = StateHistory::new()
            .record(record("a", "GO", "b", now))
            .record(record("b", "GO", "c", now))
            .record(record("c", "GO", "d", now));

        history.trim_to(2);

        let path: Vec<&str> = history.path().iter().map(|s| s.as_str()).collect();
        assert_eq!(path, vec!["b", "c", "d"]);

        history.trim_to(5);
        assert_eq!(history.len(), 2);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(record("a", "GO", "b", Utc::now()));
        let json = serde_json::to_string(&history).unwrap();
        let back: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, back);
    }
}

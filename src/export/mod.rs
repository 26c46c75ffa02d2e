//! XState-compatible projection of a machine's transition table.
//!
//! The shape is a compatibility contract with the XState ecosystem and the
//! visualization pipeline:
//!
//! ```json
//! { "id": "editor", "initial": "idle",
//!   "states": { "idle": { "on": { "EDIT": "editing" } }, "done": {} } }
//! ```
//!
//! States appear in declaration order and events in the order they were
//! first declared. Options, contexts and watchers are never exported.

use crate::core::{EventName, StateName};
use crate::engine::TransitionTable;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Top-level XState machine config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XStateConfig {
    pub id: String,
    pub initial: StateName,
    pub states: IndexMap<StateName, XStateNode>,
}

/// One state node. `on` is omitted for sink states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XStateNode {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub on: IndexMap<EventName, StateName>,
}

impl XStateConfig {
    pub fn from_table(id: &str, table: &TransitionTable) -> Self {
        let states = table
            .states()
            .iter()
            .map(|state| {
                let on = table
                    .events_from(state)
                    .map(|(event, target)| (event.clone(), target.clone()))
                    .collect();
                (state.clone(), XStateNode { on })
            })
            .collect();

        Self {
            id: id.to_owned(),
            initial: table.initial().clone(),
            states,
        }
    }

    /// Build the JSON value directly; this cannot fail.
    pub fn to_value(&self) -> Value {
        let states: Map<String, Value> = self
            .states
            .iter()
            .map(|(state, node)| {
                let mut body = Map::new();
                if !node.on.is_empty() {
                    let on = node
                        .on
                        .iter()
                        .map(|(event, target)| (event.to_string(), Value::from(target.as_str())))
                        .collect();
                    body.insert("on".to_owned(), Value::Object(on));
                }
                (state.to_string(), Value::Object(body))
            })
            .collect();

        let mut root = Map::new();
        root.insert("id".to_owned(), Value::from(self.id.as_str()));
        root.insert("initial".to_owned(), Value::from(self.initial.as_str()));
        root.insert("states".to_owned(), Value::Object(states));
        Value::Object(root)
    }

    pub fn to_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

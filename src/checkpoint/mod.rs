//! Checkpoint and resume for machines.
//!
//! A checkpoint captures a machine's runtime data: current state, private
//! contexts, global context and history. The transition table, watchers and
//! clear-on-exit overrides are not included; a checkpoint is restored into a
//! machine built from the same definition.
//!
//! Binary checkpoints use bincode, which is not self-describing, so
//! contexts of type `serde_json::Value` only round-trip through JSON.

use crate::core::{StateHistory, StateName};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a machine's runtime data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<C, G> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Id of the machine the checkpoint was taken from
    pub machine_id: String,

    pub current: StateName,

    /// Private contexts keyed by state
    pub contexts: HashMap<StateName, C>,

    pub global: Option<G>,

    pub history: StateHistory,
}

impl<C: Serialize, G: Serialize> Checkpoint<C, G> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::Encode {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            format: "binary",
            message: e.to_string(),
        })
    }
}

impl<C: DeserializeOwned, G: DeserializeOwned> Checkpoint<C, G> {
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::Decode {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            format: "binary",
            message: e.to_string(),
        })
    }
}

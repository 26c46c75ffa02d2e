//! Checkpoint error types.

use crate::core::StateName;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to encode checkpoint as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("Failed to decode {format} checkpoint: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint was taken from machine '{found}', cannot restore into '{expected}'")]
    MachineMismatch { expected: String, found: String },

    #[error("Checkpoint references undeclared state '{state}'")]
    UndeclaredState { state: StateName },
}

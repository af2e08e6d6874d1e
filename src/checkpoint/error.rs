//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations.
///
/// Unlike progress persistence, checkpoint failures are surfaced: restoring
/// from an explicit snapshot is a host decision, and the host should know
/// when the snapshot is unusable.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written by an incompatible format version
    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint contents do not fit the catalog being restored against
    #[error("checkpoint validation failed: {0}")]
    ValidationFailed(String),
}

//! Checkpoint and resume for whole tour sessions.
//!
//! The progress key (see [`crate::progress`]) remembers only the visited
//! set. A [`TourCheckpoint`] captures the full session: cursor position,
//! visited set, the timestamped visit log, and session metadata. Hosts
//! that want "pick up exactly where you left off" serialize one of these;
//! hosts that only want the progress chip can ignore this module.

use crate::core::VisitLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the checkpoint format.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Session metadata carried by the machine and snapshotted with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourMetadata {
    /// When the session started.
    pub created_at: DateTime<Utc>,

    /// Last selection or reset.
    pub updated_at: DateTime<Utc>,

    /// Total selections this session, revisits included.
    pub selections: usize,
}

impl Default for TourMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            selections: 0,
        }
    }
}

/// Serializable snapshot of a tour session.
///
/// The catalog is not part of the snapshot; it is fixed at startup and the
/// host supplies it again on restore. [`TourCheckpoint::validate`] checks
/// that the snapshot actually fits the supplied catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourCheckpoint {
    /// Checkpoint format version.
    pub version: u32,

    /// Unique checkpoint identifier.
    pub id: String,

    /// When the checkpoint was taken.
    pub timestamp: DateTime<Utc>,

    /// Cursor position at snapshot time.
    pub current_spot: usize,

    /// Visited spot indices.
    pub visited: BTreeSet<usize>,

    /// Full selection log.
    pub visits: VisitLog,

    /// Session metadata.
    pub metadata: TourMetadata,
}

impl TourCheckpoint {
    /// Serialize to JSON, the human-readable format.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unsupported versions.
    pub fn from_json(raw: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(raw)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize to the compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, rejecting unsupported versions.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(raw)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Check the snapshot against a catalog of `spot_count` spots.
    ///
    /// Rejects version mismatches, an out-of-range cursor, and visited
    /// entries outside `0..spot_count`.
    pub fn validate(&self, spot_count: usize) -> Result<(), CheckpointError> {
        self.check_version()?;
        if self.current_spot >= spot_count {
            return Err(CheckpointError::ValidationFailed(format!(
                "current spot {} out of range for {spot_count} spots",
                self.current_spot
            )));
        }
        if let Some(&max) = self.visited.iter().next_back() {
            if max >= spot_count {
                return Err(CheckpointError::ValidationFailed(format!(
                    "visited spot {max} out of range for {spot_count} spots"
                )));
            }
        }
        Ok(())
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VisitRecord;

    fn sample() -> TourCheckpoint {
        let visits = VisitLog::new()
            .record(VisitRecord {
                spot: 0,
                timestamp: Utc::now(),
                revisit: false,
            })
            .record(VisitRecord {
                spot: 2,
                timestamp: Utc::now(),
                revisit: false,
            });
        TourCheckpoint {
            version: CHECKPOINT_VERSION,
            id: "test-checkpoint".to_string(),
            timestamp: Utc::now(),
            current_spot: 2,
            visited: [0, 2].into_iter().collect(),
            visits,
            metadata: TourMetadata::default(),
        }
    }

    #[test]
    fn json_round_trip_preserves_everything() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let back = TourCheckpoint::from_json(&json).unwrap();
        assert_eq!(checkpoint, back);
    }

    #[test]
    fn binary_round_trip_preserves_everything() {
        let checkpoint = sample();
        let bytes = checkpoint.to_bytes().unwrap();
        let back = TourCheckpoint::from_bytes(&bytes).unwrap();
        assert_eq!(checkpoint, back);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = sample();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = serde_json::to_string(&checkpoint).unwrap();

        let err = TourCheckpoint::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion { found, .. } if found == CHECKPOINT_VERSION + 1
        ));
    }

    #[test]
    fn garbage_input_is_a_deserialization_error() {
        let err = TourCheckpoint::from_json("not a checkpoint").unwrap_err();
        assert!(matches!(err, CheckpointError::DeserializationFailed(_)));
    }

    #[test]
    fn validate_accepts_a_fitting_catalog() {
        assert!(sample().validate(6).is_ok());
    }

    #[test]
    fn validate_rejects_cursor_out_of_range() {
        let checkpoint = sample();
        let err = checkpoint.validate(2).unwrap_err();
        assert!(matches!(err, CheckpointError::ValidationFailed(_)));
    }

    #[test]
    fn validate_rejects_visited_out_of_range() {
        let mut checkpoint = sample();
        checkpoint.current_spot = 0;
        checkpoint.visited = [0, 9].into_iter().collect();
        let err = checkpoint.validate(6).unwrap_err();
        assert!(matches!(err, CheckpointError::ValidationFailed(_)));
    }
}

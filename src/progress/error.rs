//! Progress persistence error types.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur while persisting or restoring tour progress.
///
/// Neither variant ever reaches presentation code: the machine collapses
/// `Malformed` to an empty visited set and discards failed writes. The
/// explicit type exists so the collapse is a policy at one boundary, not
/// a habit scattered through the crate.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The stored payload is not a JSON array of integers.
    #[error("stored progress is malformed: {0}")]
    Malformed(String),

    /// The store refused the write.
    #[error("progress write failed: {0}")]
    Write(#[from] StoreError),
}

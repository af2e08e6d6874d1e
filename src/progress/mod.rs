//! The persisted progress format.
//!
//! Progress is one string key holding a JSON array of visited spot
//! indices, e.g. `[0,2,5]`. An absent key means nothing visited. The
//! format is deliberately dumb: it survives any store that can hold a
//! string, and a malformed value costs the visitor their progress, never
//! their session.
//!
//! Decoding is defensive in two layers:
//! - a payload that is not a JSON array of integers fails wholesale
//!   ([`ProgressError::Malformed`]);
//! - integers outside `0..spot_count` are silently dropped, so stale data
//!   from a longer catalog cannot smuggle invalid indices in.

use crate::store::ProgressStore;
use std::collections::BTreeSet;

pub mod error;

pub use error::ProgressError;

/// Store key used when the builder is not told otherwise.
pub const DEFAULT_PROGRESS_KEY: &str = "tour-visited";

/// Decode a persisted payload into a visited set, keeping only indices in
/// `0..spot_count`.
pub fn decode_visited(raw: &str, spot_count: usize) -> Result<BTreeSet<usize>, ProgressError> {
    let ids: Vec<i64> =
        serde_json::from_str(raw).map_err(|e| ProgressError::Malformed(e.to_string()))?;
    Ok(ids
        .into_iter()
        .filter(|&id| id >= 0 && (id as usize) < spot_count)
        .map(|id| id as usize)
        .collect())
}

/// Encode a visited set as a JSON array of integers, ascending.
pub fn encode_visited(visited: &BTreeSet<usize>) -> Result<String, ProgressError> {
    let ids: Vec<usize> = visited.iter().copied().collect();
    serde_json::to_string(&ids).map_err(|e| ProgressError::Malformed(e.to_string()))
}

/// Load the visited set stored under `key`. An absent key is an empty set;
/// a malformed payload is an error for the caller to collapse.
pub fn load(
    store: &impl ProgressStore,
    key: &str,
    spot_count: usize,
) -> Result<BTreeSet<usize>, ProgressError> {
    match store.get(key) {
        Some(raw) => decode_visited(&raw, spot_count),
        None => Ok(BTreeSet::new()),
    }
}

/// Persist the visited set under `key`.
pub fn save(
    store: &mut impl ProgressStore,
    key: &str,
    visited: &BTreeSet<usize>,
) -> Result<(), ProgressError> {
    let payload = encode_visited(visited)?;
    store.set(key, &payload)?;
    Ok(())
}

/// Erase persisted progress, best-effort.
pub fn clear(store: &mut impl ProgressStore, key: &str) {
    store.remove(key);
}

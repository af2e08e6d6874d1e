//! Pure visit-tracking and navigation state.
//!
//! All methods here are side-effect free: no storage, no notifications.
//! The imperative shell around this type lives in [`crate::machine`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Visit-tracking state for one tour: the current spot cursor and the set
/// of spot indices visited so far.
///
/// Invariants, maintained by construction and by every operation:
/// `current < spot_count` and `visited` is a subset of `0..spot_count`.
///
/// # Example
///
/// ```rust
/// use guidepost::core::TourState;
///
/// let mut state = TourState::new(6);
/// state.select(0);
/// assert_eq!(state.next_unvisited(), 1);
///
/// for index in 1..6 {
///     state.select(index);
/// }
/// assert!(state.is_complete());
/// assert_eq!(state.next_unvisited(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourState {
    current: usize,
    visited: BTreeSet<usize>,
    spot_count: usize,
}

impl TourState {
    /// Fresh state: cursor at spot 0, nothing visited.
    ///
    /// # Panics
    ///
    /// Panics if `spot_count` is zero; a tour has at least one spot.
    pub fn new(spot_count: usize) -> Self {
        assert!(spot_count >= 1, "a tour needs at least one spot");
        Self {
            current: 0,
            visited: BTreeSet::new(),
            spot_count,
        }
    }

    /// Rebuild state from previously captured parts.
    ///
    /// Visited entries outside `0..spot_count` are dropped, so a stale or
    /// corrupted set can never violate the invariants.
    ///
    /// # Panics
    ///
    /// Panics if `spot_count` is zero or `current` is out of range.
    pub fn resume(spot_count: usize, current: usize, visited: BTreeSet<usize>) -> Self {
        assert!(spot_count >= 1, "a tour needs at least one spot");
        assert!(
            current < spot_count,
            "current spot {current} out of range for {spot_count} spots"
        );
        let visited = visited.into_iter().filter(|&v| v < spot_count).collect();
        Self {
            current,
            visited,
            spot_count,
        }
    }

    /// Select a spot: move the cursor there and mark it visited.
    ///
    /// Returns `true` when the spot had not been visited before. Callers
    /// only ever pass indices derived from the catalog, so an out-of-range
    /// index is a programming error, not a runtime condition.
    ///
    /// # Panics
    ///
    /// Panics if `index >= spot_count`.
    pub fn select(&mut self, index: usize) -> bool {
        assert!(
            index < self.spot_count,
            "spot index {index} out of range for {} spots",
            self.spot_count
        );
        self.current = index;
        self.visited.insert(index)
    }

    /// Move the cursor without recording a visit.
    ///
    /// Used when repositioning for navigation, e.g. resuming a saved tour
    /// at the next unvisited spot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= spot_count`.
    pub fn jump_to(&mut self, index: usize) {
        assert!(
            index < self.spot_count,
            "spot index {index} out of range for {} spots",
            self.spot_count
        );
        self.current = index;
    }

    /// The first unvisited spot in circular order after the cursor.
    ///
    /// Scans `(current + 1) % N`, `(current + 2) % N`, ... for up to N
    /// steps. When every spot has been visited it returns 0: a completed
    /// tour wraps back to the start rather than failing, since "nothing
    /// left to visit" is itself a valid state. Callers that want to treat
    /// completion specially check [`TourState::is_complete`] first.
    pub fn next_unvisited(&self) -> usize {
        for step in 1..=self.spot_count {
            let index = (self.current + step) % self.spot_count;
            if !self.visited.contains(&index) {
                return index;
            }
        }
        0
    }

    /// True once every spot has been visited.
    pub fn is_complete(&self) -> bool {
        self.visited.len() >= self.spot_count
    }

    /// Clear all visits and return the cursor to spot 0.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.current = 0;
    }

    /// Index of the current spot.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The visited spot indices, ascending.
    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    /// How many distinct spots have been visited.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Total number of spots in the tour.
    pub fn spot_count(&self) -> usize {
        self.spot_count
    }
}

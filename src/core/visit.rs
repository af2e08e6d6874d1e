//! Timestamped log of spot selections.
//!
//! The log is an immutable value: recording returns a new log rather than
//! mutating in place, so snapshots can share it freely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One selection of a spot at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Index of the selected spot.
    pub spot: usize,
    /// When the selection happened.
    pub timestamp: DateTime<Utc>,
    /// True when the spot had already been visited before this selection.
    pub revisit: bool,
}

/// Ordered log of every selection made during a tour session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitLog {
    records: Vec<VisitRecord>,
}

impl VisitLog {
    /// An empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning the extended log. The original is left
    /// unchanged.
    pub fn record(&self, record: VisitRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in selection order.
    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    /// The spot indices in the order they were selected, revisits included.
    pub fn path(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.spot).collect()
    }

    /// Number of selections recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been selected yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Elapsed time between the first and last selection, or `None` for an
    /// empty log.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

//! The tour machine: imperative shell around the pure core.
//!
//! [`TourMachine`] binds a [`SpotCatalog`], a [`TourState`], a progress
//! store, and any subscribed observers. All storage failures collapse
//! here: a bad read becomes an empty visited set, a failed write is
//! discarded. The visitor loses remembered progress at worst, never the
//! running session.

use crate::checkpoint::{CheckpointError, TourCheckpoint, TourMetadata, CHECKPOINT_VERSION};
use crate::core::{Spot, SpotCatalog, TourState, VisitLog, VisitRecord};
use crate::progress::{self, DEFAULT_PROGRESS_KEY};
use crate::store::ProgressStore;
use chrono::Utc;
use log::{debug, warn};
use std::collections::BTreeSet;
use uuid::Uuid;

pub mod observer;

pub use observer::TourObserver;

/// Visit-tracking state machine for one tour session.
///
/// Constructed at startup (usually through
/// [`TourBuilder`](crate::builder::TourBuilder)) and handed by reference
/// to the presentation layer; there are no ambient singletons. All
/// operations are synchronous and complete immediately.
///
/// # Example
///
/// ```rust
/// use guidepost::core::{Spot, SpotCatalog};
/// use guidepost::machine::TourMachine;
/// use guidepost::store::MemoryStore;
///
/// let catalog = SpotCatalog::new(vec![
///     Spot::new("Gate", "The main gate.", "#img-gate", (0.0, 0.0, -2.0)),
///     Spot::new("Library", "Quiet study spaces.", "#img-library", (-2.0, 0.0, -3.0)),
/// ]);
/// let mut tour = TourMachine::new(catalog, MemoryStore::new());
///
/// tour.select_spot(0);
/// assert_eq!(tour.next_unvisited(), 1);
///
/// tour.select_spot(1);
/// assert!(tour.is_complete());
/// ```
pub struct TourMachine<P: ProgressStore> {
    catalog: SpotCatalog,
    state: TourState,
    visits: VisitLog,
    store: P,
    observers: Vec<Box<dyn TourObserver>>,
    progress_key: String,
    metadata: TourMetadata,
}

impl<P: ProgressStore + std::fmt::Debug> std::fmt::Debug for TourMachine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourMachine")
            .field("catalog", &self.catalog)
            .field("state", &self.state)
            .field("visits", &self.visits)
            .field("store", &self.store)
            .field("observers", &self.observers.len())
            .field("progress_key", &self.progress_key)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl<P: ProgressStore> TourMachine<P> {
    /// Create a machine over `catalog`, rehydrating progress from `store`
    /// under the default key.
    ///
    /// If any spot was already visited in a previous session, the cursor
    /// starts at the next unvisited spot (wrapping to 0 when the whole
    /// tour is already done) instead of at spot 0.
    ///
    /// # Panics
    ///
    /// Panics if the catalog is empty. Use
    /// [`TourBuilder`](crate::builder::TourBuilder) for a `Result`-based
    /// construction path.
    pub fn new(catalog: SpotCatalog, store: P) -> Self {
        Self::with_progress_key(catalog, store, DEFAULT_PROGRESS_KEY)
    }

    /// Like [`TourMachine::new`] but persisting under a custom key, for
    /// hosts running several independent tours against one store.
    ///
    /// # Panics
    ///
    /// Panics if the catalog is empty.
    pub fn with_progress_key(catalog: SpotCatalog, store: P, key: impl Into<String>) -> Self {
        assert!(!catalog.is_empty(), "a tour needs at least one spot");
        let progress_key = key.into();
        let spot_count = catalog.len();

        let visited = match progress::load(&store, &progress_key, spot_count) {
            Ok(visited) => visited,
            Err(err) => {
                warn!("discarding unreadable progress: {err}");
                BTreeSet::new()
            }
        };

        let mut state = TourState::resume(spot_count, 0, visited);
        if state.visited_count() > 0 {
            let next = state.next_unvisited();
            state.jump_to(next);
        }

        Self {
            catalog,
            state,
            visits: VisitLog::new(),
            store,
            observers: Vec::new(),
            progress_key,
            metadata: TourMetadata::default(),
        }
    }

    /// Restore a machine from a checkpoint taken by
    /// [`TourMachine::checkpoint`].
    ///
    /// The checkpoint must fit the supplied catalog; see
    /// [`TourCheckpoint::validate`]. The persisted progress key is left
    /// untouched until the next selection writes it.
    pub fn restore(
        catalog: SpotCatalog,
        store: P,
        checkpoint: TourCheckpoint,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate(catalog.len())?;
        let state = TourState::resume(catalog.len(), checkpoint.current_spot, checkpoint.visited);
        Ok(Self {
            catalog,
            state,
            visits: checkpoint.visits,
            store,
            observers: Vec::new(),
            progress_key: DEFAULT_PROGRESS_KEY.to_string(),
            metadata: checkpoint.metadata,
        })
    }

    /// Subscribe an observer to state-change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TourObserver>) {
        self.observers.push(observer);
    }

    /// Select a spot: make it current, mark it visited, notify observers,
    /// persist progress.
    ///
    /// Observers are told in order: `on_spot_selected`, then
    /// `on_progress_changed`, then `on_tour_complete` if this selection
    /// was the one that completed the set. The persistence write happens
    /// last and its failure is swallowed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the catalog; callers only
    /// ever pass indices derived from it.
    pub fn select_spot(&mut self, index: usize) {
        let newly_visited = self.state.select(index);
        let spot = self.catalog.spots()[index].clone();

        let timestamp = Utc::now();
        self.visits = self.visits.record(VisitRecord {
            spot: index,
            timestamp,
            revisit: !newly_visited,
        });
        self.metadata.updated_at = timestamp;
        self.metadata.selections += 1;

        for observer in &mut self.observers {
            observer.on_spot_selected(&spot);
        }
        let (visited, total) = (self.state.visited_count(), self.state.spot_count());
        for observer in &mut self.observers {
            observer.on_progress_changed(visited, total);
        }
        if newly_visited && self.state.is_complete() {
            for observer in &mut self.observers {
                observer.on_tour_complete();
            }
        }

        self.save_progress();
    }

    /// The first unvisited spot in circular order after the current one;
    /// 0 when the tour is complete. See [`TourState::next_unvisited`].
    pub fn next_unvisited(&self) -> usize {
        self.state.next_unvisited()
    }

    /// True once every spot has been visited.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Clear all progress: visited set, visit log, cursor back to spot 0,
    /// persisted key removed (best-effort). Observers are told the
    /// progress count dropped to zero.
    pub fn reset(&mut self) {
        self.state.reset();
        self.visits = VisitLog::new();
        self.metadata.updated_at = Utc::now();

        progress::clear(&mut self.store, &self.progress_key);

        let total = self.state.spot_count();
        for observer in &mut self.observers {
            observer.on_progress_changed(0, total);
        }
    }

    /// Read the visited set currently persisted in the store.
    ///
    /// Absent, unreadable, or malformed storage all yield the empty set;
    /// out-of-range indices are filtered. Never fails.
    pub fn load_progress(&self) -> BTreeSet<usize> {
        match progress::load(&self.store, &self.progress_key, self.state.spot_count()) {
            Ok(visited) => visited,
            Err(err) => {
                warn!("discarding unreadable progress: {err}");
                BTreeSet::new()
            }
        }
    }

    /// Persist the in-memory visited set. A storage failure is logged and
    /// discarded; losing remembered progress is acceptable, failing the
    /// session is not.
    pub fn save_progress(&mut self) {
        if let Err(err) = progress::save(&mut self.store, &self.progress_key, self.state.visited())
        {
            debug!("progress write discarded: {err}");
        }
    }

    /// Snapshot the full session for later [`TourMachine::restore`].
    pub fn checkpoint(&self) -> TourCheckpoint {
        TourCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_spot: self.state.current(),
            visited: self.state.visited().clone(),
            visits: self.visits.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Index of the current spot.
    pub fn current_spot(&self) -> usize {
        self.state.current()
    }

    /// The current spot's display data.
    pub fn current(&self) -> &Spot {
        &self.catalog.spots()[self.state.current()]
    }

    /// The visited spot indices, ascending.
    pub fn visited(&self) -> &BTreeSet<usize> {
        self.state.visited()
    }

    /// How many distinct spots have been visited.
    pub fn visited_count(&self) -> usize {
        self.state.visited_count()
    }

    /// Total number of spots.
    pub fn spot_count(&self) -> usize {
        self.state.spot_count()
    }

    /// The catalog this machine serves.
    pub fn catalog(&self) -> &SpotCatalog {
        &self.catalog
    }

    /// The timestamped log of selections this session.
    pub fn visit_log(&self) -> &VisitLog {
        &self.visits
    }

    /// The key progress is persisted under.
    pub fn progress_key(&self) -> &str {
        &self.progress_key
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &P {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn campus() -> SpotCatalog {
        SpotCatalog::new(vec![
            Spot::new("Main Entrance", "Visitors arrive here.", "#img-gate", (0.0, 0.0, -2.0)),
            Spot::new("Cafeteria", "Food and meetups.", "#img-cafe", (2.0, 0.0, -3.0)),
            Spot::new("Library", "Quiet study spaces.", "#img-library", (-2.0, 0.0, -3.0)),
            Spot::new("Lecture Halls", "Daily teaching.", "#img-halls", (3.5, 0.0, -4.0)),
            Spot::new("Laboratory", "Practical training.", "#img-lab", (-3.5, 0.0, -4.0)),
            Spot::new("Courtyard", "Open-air seating.", "#img-yard", (0.0, 0.0, -5.0)),
        ])
    }

    /// Observer that appends a line per notification to a shared list.
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl TourObserver for Recorder {
        fn on_spot_selected(&mut self, spot: &Spot) {
            self.events.borrow_mut().push(format!("selected:{}", spot.id));
        }

        fn on_progress_changed(&mut self, visited: usize, total: usize) {
            self.events
                .borrow_mut()
                .push(format!("progress:{visited}/{total}"));
        }

        fn on_tour_complete(&mut self) {
            self.events.borrow_mut().push("complete".to_string());
        }
    }

    fn recorded(machine: &mut TourMachine<MemoryStore>) -> Rc<RefCell<Vec<String>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        machine.subscribe(Box::new(Recorder {
            events: Rc::clone(&events),
        }));
        events
    }

    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) {}
    }

    #[test]
    fn select_spot_persists_progress() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        tour.select_spot(0);
        tour.select_spot(2);

        assert_eq!(
            tour.store().get(DEFAULT_PROGRESS_KEY).as_deref(),
            Some("[0,2]")
        );
    }

    #[test]
    fn fresh_machine_starts_at_spot_zero() {
        let tour = TourMachine::new(campus(), MemoryStore::new());
        assert_eq!(tour.current_spot(), 0);
        assert_eq!(tour.visited_count(), 0);
        assert_eq!(tour.current().name, "Main Entrance");
    }

    #[test]
    fn rehydration_resumes_at_next_unvisited_spot() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_PROGRESS_KEY, "[0,1]").unwrap();

        let tour = TourMachine::new(campus(), store);
        assert_eq!(tour.visited_count(), 2);
        assert_eq!(tour.current_spot(), 2);
    }

    #[test]
    fn rehydration_of_completed_tour_wraps_to_zero() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_PROGRESS_KEY, "[0,1,2,3,4,5]").unwrap();

        let tour = TourMachine::new(campus(), store);
        assert!(tour.is_complete());
        assert_eq!(tour.current_spot(), 0);
    }

    #[test]
    fn corrupt_storage_rehydrates_as_empty() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_PROGRESS_KEY, "not json").unwrap();

        let tour = TourMachine::new(campus(), store);
        assert_eq!(tour.visited_count(), 0);
        assert_eq!(tour.current_spot(), 0);
    }

    #[test]
    fn observers_hear_selection_and_progress() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        let events = recorded(&mut tour);

        tour.select_spot(0);
        tour.select_spot(3);

        assert_eq!(
            *events.borrow(),
            vec!["selected:0", "progress:1/6", "selected:3", "progress:2/6"]
        );
    }

    #[test]
    fn completion_fires_once_on_the_completing_selection() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        let events = recorded(&mut tour);

        for index in 0..6 {
            tour.select_spot(index);
        }
        // Revisit after completion; no second completion event.
        tour.select_spot(3);

        let completions = events.borrow().iter().filter(|e| *e == "complete").count();
        assert_eq!(completions, 1);
        assert_eq!(events.borrow().last().map(String::as_str), Some("progress:6/6"));
    }

    #[test]
    fn walkthrough_follows_next_unvisited_ordering() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());

        tour.select_spot(0);
        let mut order = vec![0];
        while !tour.is_complete() {
            let next = tour.next_unvisited();
            tour.select_spot(next);
            order.push(next);
        }

        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(tour.next_unvisited(), 0);
    }

    #[test]
    fn reset_clears_state_store_and_notifies() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        tour.select_spot(0);
        tour.select_spot(4);

        let events = recorded(&mut tour);
        tour.reset();

        assert_eq!(tour.current_spot(), 0);
        assert_eq!(tour.visited_count(), 0);
        assert!(tour.visit_log().is_empty());
        assert!(tour.load_progress().is_empty());
        assert_eq!(*events.borrow(), vec!["progress:0/6"]);
    }

    #[test]
    fn failing_writes_never_surface() {
        let mut tour = TourMachine::new(campus(), FailingStore);
        tour.select_spot(0);
        tour.select_spot(1);

        // In-memory state is intact even though nothing persisted.
        assert_eq!(tour.visited_count(), 2);
        assert!(tour.load_progress().is_empty());
    }

    #[test]
    fn visit_log_tracks_revisits() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        tour.select_spot(2);
        tour.select_spot(2);

        let records = tour.visit_log().records();
        assert_eq!(records.len(), 2);
        assert!(!records[0].revisit);
        assert!(records[1].revisit);
        assert_eq!(tour.visited_count(), 1);
    }

    #[test]
    fn custom_progress_keys_keep_tours_independent() {
        let mut store = MemoryStore::new();
        store.set("museum", "[1]").unwrap();

        let tour = TourMachine::with_progress_key(campus(), store, "museum");
        assert_eq!(tour.visited_count(), 1);
        assert_eq!(tour.progress_key(), "museum");
    }

    #[test]
    fn checkpoint_and_restore_preserve_the_session() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        tour.select_spot(0);
        tour.select_spot(2);
        tour.select_spot(0);

        let checkpoint = tour.checkpoint();
        let restored = TourMachine::restore(campus(), MemoryStore::new(), checkpoint).unwrap();

        assert_eq!(restored.current_spot(), 0);
        assert_eq!(restored.visited(), tour.visited());
        assert_eq!(restored.visit_log().path(), vec![0, 2, 0]);
    }

    #[test]
    fn restore_rejects_a_checkpoint_from_a_bigger_catalog() {
        let mut tour = TourMachine::new(campus(), MemoryStore::new());
        tour.select_spot(5);

        let checkpoint = tour.checkpoint();
        let small = SpotCatalog::new(vec![Spot::new("Only", "One spot.", "#img", (0.0, 0.0, 0.0))]);

        let err = TourMachine::restore(small, MemoryStore::new(), checkpoint).unwrap_err();
        assert!(matches!(err, CheckpointError::ValidationFailed(_)));
    }

    #[test]
    #[should_panic(expected = "at least one spot")]
    fn empty_catalog_is_rejected() {
        TourMachine::new(SpotCatalog::new(Vec::new()), MemoryStore::new());
    }
}

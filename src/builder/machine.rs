//! Builder for constructing tour machines.

use crate::builder::error::BuildError;
use crate::core::{Spot, SpotCatalog};
use crate::machine::{TourMachine, TourObserver};
use crate::progress::DEFAULT_PROGRESS_KEY;
use crate::store::ProgressStore;
use glam::Vec3;

/// Builder for constructing a [`TourMachine`] with a fluent API.
///
/// Validation happens in [`build`](TourBuilder::build): at least one spot
/// and a store are required.
pub struct TourBuilder<P: ProgressStore> {
    spots: Vec<Spot>,
    store: Option<P>,
    observers: Vec<Box<dyn TourObserver>>,
    progress_key: Option<String>,
}

impl<P: ProgressStore> TourBuilder<P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            spots: Vec::new(),
            store: None,
            observers: Vec::new(),
            progress_key: None,
        }
    }

    /// Append a spot to the tour, in visiting order.
    pub fn spot(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        position: impl Into<Vec3>,
    ) -> Self {
        self.spots.push(Spot::new(name, description, image_ref, position));
        self
    }

    /// Append every spot of a pre-built catalog, e.g. one declared with
    /// [`spot_catalog!`](crate::spot_catalog).
    pub fn catalog(mut self, catalog: SpotCatalog) -> Self {
        self.spots.extend(catalog.into_spots());
        self
    }

    /// Set the progress store (required).
    pub fn store(mut self, store: P) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the key progress is persisted under. Defaults to
    /// [`DEFAULT_PROGRESS_KEY`].
    pub fn progress_key(mut self, key: impl Into<String>) -> Self {
        self.progress_key = Some(key.into());
        self
    }

    /// Subscribe an observer at construction time.
    pub fn observer(mut self, observer: Box<dyn TourObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the machine, rehydrating any persisted progress.
    /// Returns an error if required pieces are missing.
    pub fn build(self) -> Result<TourMachine<P>, BuildError> {
        if self.spots.is_empty() {
            return Err(BuildError::NoSpots);
        }
        let store = self.store.ok_or(BuildError::MissingStore)?;

        let catalog = SpotCatalog::new(self.spots);
        let key = self
            .progress_key
            .unwrap_or_else(|| DEFAULT_PROGRESS_KEY.to_string());

        let mut machine = TourMachine::with_progress_key(catalog, store, key);
        for observer in self.observers {
            machine.subscribe(observer);
        }
        Ok(machine)
    }
}

impl<P: ProgressStore> Default for TourBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

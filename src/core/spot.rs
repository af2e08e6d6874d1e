//! Spots and the fixed catalog that orders them.
//!
//! A [`Spot`] carries the display metadata and 3D position the presentation
//! layer needs to render a marker and an info panel. The crate never
//! interprets this data; it only hands it back out through observers and
//! accessors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One fixed point of interest in the tour.
///
/// Spots are immutable after the catalog is built. The `id` is the spot's
/// index in the catalog and is assigned by [`SpotCatalog::new`]; any value
/// set before that is overwritten.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Index of this spot in the catalog.
    pub id: usize,
    /// Short display name, e.g. shown on the marker label.
    pub name: String,
    /// Longer description for the info panel.
    pub description: String,
    /// Opaque reference to the panel image (asset id, URL, ...).
    pub image_ref: String,
    /// Position of the marker in the scene.
    pub position: Vec3,
}

impl Spot {
    /// Create a spot with display metadata and a scene position.
    ///
    /// The position accepts anything convertible to a [`Vec3`], so tuples
    /// work: `Spot::new("Gate", "Main gate.", "#img-gate", (0.0, 0.0, -2.0))`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        position: impl Into<Vec3>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            image_ref: image_ref.into(),
            position: position.into(),
        }
    }
}

/// The ordered, fixed sequence of spots making up a tour.
///
/// The catalog is constructed once at startup and never changes afterwards;
/// visit tracking refers to spots by their index in this sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotCatalog {
    spots: Vec<Spot>,
}

impl SpotCatalog {
    /// Build a catalog, assigning each spot's `id` from its position in
    /// the list.
    pub fn new(mut spots: Vec<Spot>) -> Self {
        for (index, spot) in spots.iter_mut().enumerate() {
            spot.id = index;
        }
        Self { spots }
    }

    /// Number of spots in the tour.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// True when the catalog holds no spots.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Look up a spot by index.
    pub fn get(&self, index: usize) -> Option<&Spot> {
        self.spots.get(index)
    }

    /// All spots in tour order.
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// Consume the catalog, yielding the spots in tour order.
    pub fn into_spots(self) -> Vec<Spot> {
        self.spots
    }
}

//! Guidepost: a guided-tour state machine for AR and 3D scene overlays.
//!
//! Guidepost tracks which spots of a fixed tour a visitor has viewed and
//! drives navigation from simple selection events. It follows a "pure
//! core, imperative shell" split: the navigation logic is side-effect
//! free, while persistence and observer notifications are isolated in the
//! machine layer, where every storage failure degrades gracefully instead
//! of surfacing.
//!
//! Rendering, DOM wiring, and audio are deliberately outside this crate:
//! presentation layers subscribe through [`machine::TourObserver`] and
//! persistence is pluggable through [`store::ProgressStore`].
//!
//! # Core Concepts
//!
//! - **Spot**: one point of interest, with display metadata and a 3D
//!   position ([`crate::core::Spot`], [`crate::core::SpotCatalog`])
//! - **Tour state**: the current-spot cursor and visited set, with the
//!   circular next-unvisited scan ([`crate::core::TourState`])
//! - **Progress**: the persisted visited set, one JSON integer array
//!   under one string key ([`progress`])
//! - **Checkpoint**: a versioned snapshot of a whole session for exact
//!   resume ([`checkpoint::TourCheckpoint`])
//!
//! # Example
//!
//! ```rust
//! use guidepost::builder::TourBuilder;
//! use guidepost::store::MemoryStore;
//!
//! let mut tour = TourBuilder::new()
//!     .spot("Main Entrance", "Visitors arrive here.", "#img-gate", (0.0, 0.0, -2.0))
//!     .spot("Library", "Quiet study spaces.", "#img-library", (-2.0, 0.0, -3.0))
//!     .spot("Courtyard", "Open-air seating.", "#img-yard", (0.0, 0.0, -5.0))
//!     .store(MemoryStore::new())
//!     .build()
//!     .unwrap();
//!
//! tour.select_spot(0);
//! assert_eq!(tour.next_unvisited(), 1);
//! assert!(!tour.is_complete());
//!
//! tour.select_spot(1);
//! tour.select_spot(2);
//! assert!(tour.is_complete());
//! assert_eq!(tour.next_unvisited(), 0);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod progress;
pub mod store;

// Re-export commonly used types
pub use builder::{BuildError, TourBuilder};
pub use checkpoint::{CheckpointError, TourCheckpoint, TourMetadata, CHECKPOINT_VERSION};
pub use machine::{TourMachine, TourObserver};
pub use self::core::{Spot, SpotCatalog, TourState, VisitLog, VisitRecord};
pub use progress::{ProgressError, DEFAULT_PROGRESS_KEY};
pub use store::{FileStore, MemoryStore, ProgressStore, StoreError};

//! Pure tour state and navigation logic.
//!
//! This module holds the side-effect-free half of the crate:
//! - [`Spot`] and [`SpotCatalog`]: the fixed set of points of interest
//! - [`TourState`]: cursor, visited set, and the next-unvisited scan
//! - [`VisitLog`]: an immutable record of selections over time
//!
//! Storage and observer notifications live in the imperative shell,
//! [`crate::machine`].

mod spot;
mod state;
mod visit;

pub use spot::{Spot, SpotCatalog};
pub use state::TourState;
pub use visit::{VisitLog, VisitRecord};

//! Build errors for tour construction.

use thiserror::Error;

/// Errors that can occur when building a tour machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No spots defined. Add at least one spot before .build()")]
    NoSpots,

    #[error("Progress store not specified. Call .store(store) before .build()")]
    MissingStore,
}

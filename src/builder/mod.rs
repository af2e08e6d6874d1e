//! Builder API for ergonomic tour construction.
//!
//! This module provides a fluent builder and a catalog macro for creating
//! tour machines with minimal boilerplate while keeping construction-time
//! validation explicit.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::TourBuilder;

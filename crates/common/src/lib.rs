//! Shared value types for the tilefield engine.
//!
//! # Invariants
//! - A `Viewport` handed to the layout crates has been validated (both
//!   world extents and both pixel extents are positive).

mod error;
mod types;

pub use error::ConfigError;
pub use types::{CellCoord, Viewport};

//! Layout: viewport sizing, the infinite (toroidal) grid, and tile-to-image mapping.
//!
//! # Invariants
//! - Every coordinate passes through [`wrap`] before it becomes a position, so
//!   offsets of any magnitude stay in range.
//! - `cols`/`rows` always cover the viewport plus a wrap margin, for any offset.
//! - A cell's image index depends only on `(col, row, rows, catalog length)`.

mod catalog;
mod config;
mod grid;
mod sizer;

pub use catalog::{ImageCatalog, image_index};
pub use config::{ColumnSpeed, LayoutConfig, SizingMode};
pub use grid::{TileArena, TilePlacement, compute_layout, place_cell, wrap};
pub use sizer::{GridConfig, MAX_TILES, compute_grid_config};

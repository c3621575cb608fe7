use glam::{DVec2, Vec2};
use serde::{Deserialize, Serialize};
use tilefield_common::CellCoord;

use crate::catalog::ImageCatalog;
use crate::config::ColumnSpeed;
use crate::sizer::GridConfig;

/// Euclidean modulo: always in `[0, size)`, including for negative `value`.
///
/// A plain `%` keeps the sign of `value`, which makes tiles jump as the
/// offset crosses zero.
pub fn wrap(value: f64, size: f64) -> f64 {
    debug_assert!(size > 0.0, "wrap size must be positive");
    ((value % size) + size) % size
}

/// One tile of the current frame: which cell, where its center is, its size,
/// and which catalog image it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub col: u32,
    pub row: u32,
    /// Tile center in world units, relative to the viewport center.
    pub position: Vec2,
    /// Drawn size (cell size, gap excluded).
    pub size: Vec2,
    pub image_index: usize,
}

/// Center of cell `(col, row)` on the centered torus for a layout offset.
///
/// Horizontal travel is uniform; vertical travel is scaled per column.
pub fn place_cell(
    grid: &GridConfig,
    column_speed: &ColumnSpeed,
    offset: DVec2,
    col: u32,
    row: u32,
) -> DVec2 {
    let stride = grid.effective_cell();
    let total = grid.total_size();
    let speed = column_speed.speed(col);

    let x = wrap(col as f64 * stride.x - offset.x, total.x) - total.x / 2.0 + stride.x / 2.0;
    let y = wrap(row as f64 * stride.y - offset.y * speed, total.y) - total.y / 2.0
        + stride.y / 2.0;
    DVec2::new(x, y)
}

/// Build a fresh placement list for `grid` at `offset`, column-major.
pub fn compute_layout(
    grid: &GridConfig,
    column_speed: &ColumnSpeed,
    offset: DVec2,
    catalog: &ImageCatalog,
) -> Vec<TilePlacement> {
    let mut arena = TileArena::new(grid, catalog);
    arena.relayout(grid, column_speed, offset);
    arena.placements
}

/// Fixed-size placement buffer reused across ticks.
///
/// Slot `i` always holds cell `(i / rows, i % rows)`; only positions change
/// between resizes.
#[derive(Debug, Clone, Default)]
pub struct TileArena {
    placements: Vec<TilePlacement>,
    cols: u32,
    rows: u32,
}

impl TileArena {
    pub fn new(grid: &GridConfig, catalog: &ImageCatalog) -> Self {
        let mut arena = Self::default();
        arena.resize(grid, catalog);
        arena
    }

    /// Reallocate for a new grid and reassign image indices.
    pub fn resize(&mut self, grid: &GridConfig, catalog: &ImageCatalog) {
        let size = grid.cell_size().as_vec2();
        self.placements.clear();
        self.placements.reserve(grid.tile_count());
        for col in 0..grid.cols {
            for row in 0..grid.rows {
                self.placements.push(TilePlacement {
                    col,
                    row,
                    position: Vec2::ZERO,
                    size,
                    image_index: catalog.index_for(col, row, grid.rows),
                });
            }
        }
        self.cols = grid.cols;
        self.rows = grid.rows;
        tracing::debug!(tiles = self.placements.len(), "tile arena resized");
    }

    /// Recompute every tile position in place.
    pub fn relayout(&mut self, grid: &GridConfig, column_speed: &ColumnSpeed, offset: DVec2) {
        debug_assert_eq!((self.cols, self.rows), (grid.cols, grid.rows));
        for tile in &mut self.placements {
            tile.position = place_cell(grid, column_speed, offset, tile.col, tile.row).as_vec2();
        }
    }

    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placement for a cell, if it is inside the current grid.
    pub fn get(&self, cell: CellCoord) -> Option<&TilePlacement> {
        if cell.col >= self.cols || cell.row >= self.rows {
            return None;
        }
        self.placements
            .get(cell.col as usize * self.rows as usize + cell.row as usize)
    }
}

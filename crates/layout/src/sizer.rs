use glam::DVec2;
use serde::{Deserialize, Serialize};
use tilefield_common::{ConfigError, Viewport};

use crate::config::{LayoutConfig, SizingMode, validate_gaps};

/// Upper bound on `cols * rows`. Larger grids are treated as a configuration
/// error rather than allocated.
pub const MAX_TILES: u64 = 1 << 20;

/// Concrete grid geometry derived from a viewport. Replaced, never mutated,
/// when the viewport changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub cols: u32,
    pub rows: u32,
}

impl GridConfig {
    /// Build a grid directly, bypassing viewport sizing.
    pub fn new(
        cell_width: f64,
        cell_height: f64,
        gap_x: f64,
        gap_y: f64,
        cols: u32,
        rows: u32,
    ) -> Result<Self, ConfigError> {
        let grid = Self {
            cell_width,
            cell_height,
            gap_x,
            gap_y,
            cols,
            rows,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroGridDimension {
                cols: self.cols,
                rows: self.rows,
            });
        }
        let ok = self.cell_width.is_finite()
            && self.cell_height.is_finite()
            && self.cell_width > 0.0
            && self.cell_height > 0.0;
        if !ok {
            return Err(ConfigError::NonPositiveCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        validate_gaps(self.gap_x, self.gap_y)?;
        if self.tile_count() as u64 > MAX_TILES {
            return Err(ConfigError::InvalidParameter {
                name: "tile_count",
                value: self.tile_count() as f64,
            });
        }
        Ok(())
    }

    /// Cell plus gap, the stride between neighbouring tiles.
    pub fn effective_cell(&self) -> DVec2 {
        DVec2::new(self.cell_width + self.gap_x, self.cell_height + self.gap_y)
    }

    /// Torus extent: the layout repeats with this period on each axis.
    pub fn total_size(&self) -> DVec2 {
        self.effective_cell() * DVec2::new(self.cols as f64, self.rows as f64)
    }

    pub fn cell_size(&self) -> DVec2 {
        DVec2::new(self.cell_width, self.cell_height)
    }

    pub fn tile_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// Derive the grid for a viewport.
///
/// Each axis gets `ceil(viewport / effective_cell) + 2` cells (or the
/// configured minimum, whichever is larger). The centered torus spans
/// `[phase - total/2, phase + total/2)` with `phase` anywhere in one stride,
/// so a full stride of margin is needed on both sides.
pub fn compute_grid_config(
    viewport: &Viewport,
    layout: &LayoutConfig,
) -> Result<GridConfig, ConfigError> {
    viewport.validate()?;
    layout.validate()?;

    let (cell_width, cell_height, gap_x, gap_y) = match layout.sizing {
        SizingMode::Fixed {
            cell_width,
            cell_height,
            gap_x,
            gap_y,
        } => (cell_width, cell_height, gap_x, gap_y),
        SizingMode::Responsive {
            visible_cols,
            visible_rows,
            gap_x,
            gap_y,
        } => (
            responsive_cell(viewport.width, visible_cols, gap_x)?,
            responsive_cell(viewport.height, visible_rows, gap_y)?,
            gap_x,
            gap_y,
        ),
    };

    let cols = covering_count(viewport.width, cell_width + gap_x)?.max(layout.min_cols);
    let rows = covering_count(viewport.height, cell_height + gap_y)?.max(layout.min_rows);

    let grid = GridConfig::new(cell_width, cell_height, gap_x, gap_y, cols, rows)?;
    tracing::debug!(
        cols = grid.cols,
        rows = grid.rows,
        cell_width = grid.cell_width,
        cell_height = grid.cell_height,
        "grid config computed"
    );
    Ok(grid)
}

fn responsive_cell(extent: f64, visible: u32, gap: f64) -> Result<f64, ConfigError> {
    let cell = (extent - (visible as f64 + 1.0) * gap) / visible as f64;
    if cell > 0.0 && cell.is_finite() {
        Ok(cell)
    } else {
        Err(ConfigError::DegenerateCells { visible, extent })
    }
}

fn covering_count(extent: f64, stride: f64) -> Result<u32, ConfigError> {
    let count = (extent / stride).ceil() + 2.0;
    if count > MAX_TILES as f64 {
        return Err(ConfigError::InvalidParameter {
            name: "tile_count",
            value: count,
        });
    }
    Ok(count as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSpeed;

    fn fixed(cell: f64, gap: f64) -> LayoutConfig {
        LayoutConfig::new(SizingMode::Fixed {
            cell_width: cell,
            cell_height: cell,
            gap_x: gap,
            gap_y: gap,
        })
    }

    #[test]
    fn fixed_sizing_covers_viewport_with_margin() {
        let viewport = Viewport::new(10.0, 5.0, 1000, 500);
        let grid = compute_grid_config(&viewport, &fixed(3.0, 0.1)).unwrap();
        assert_eq!(grid.cell_width, 3.0);
        // ceil(10 / 3.1) = 4, ceil(5 / 3.1) = 2
        assert_eq!(grid.cols, 6);
        assert_eq!(grid.rows, 4);
        let total = grid.total_size();
        let stride = grid.effective_cell();
        assert!(total.x >= viewport.width + 2.0 * stride.x);
        assert!(total.y >= viewport.height + 2.0 * stride.y);
    }

    #[test]
    fn cell_count_satisfies_minimum_invariant() {
        for width in [0.5, 1.0, 3.1, 7.7, 12.4, 40.0, 333.3] {
            let viewport = Viewport::new(width, width / 2.0, 800, 400);
            let grid = compute_grid_config(&viewport, &fixed(3.0, 0.1)).unwrap();
            let stride = grid.effective_cell();
            assert!(grid.cols as f64 >= (width / stride.x).ceil() + 1.0);
            assert!(grid.rows as f64 >= (width / 2.0 / stride.y).ceil() + 1.0);
        }
    }

    #[test]
    fn minimum_rows_respected() {
        let viewport = Viewport::new(10.0, 5.0, 1000, 500);
        let layout = LayoutConfig {
            min_rows: 10,
            ..fixed(3.0, 0.1)
        };
        let grid = compute_grid_config(&viewport, &layout).unwrap();
        assert_eq!(grid.rows, 10);
        assert_eq!(grid.cols, 6);
    }

    #[test]
    fn responsive_sizing_derives_cell_from_visible_count() {
        let viewport = Viewport::new(10.0, 6.0, 1000, 600);
        let layout = LayoutConfig {
            sizing: SizingMode::Responsive {
                visible_cols: 4,
                visible_rows: 2,
                gap_x: 0.2,
                gap_y: 0.2,
            },
            scroll_speed_scale: 1.0,
            column_speed: ColumnSpeed::Uniform,
            min_cols: 0,
            min_rows: 0,
        };
        let grid = compute_grid_config(&viewport, &layout).unwrap();
        assert!((grid.cell_width - (10.0 - 5.0 * 0.2) / 4.0).abs() < 1e-12);
        assert!((grid.cell_height - (6.0 - 3.0 * 0.2) / 2.0).abs() < 1e-12);
        // stride slightly under viewport / visible, so one extra partial cell
        assert_eq!(grid.cols, 4 + 1 + 2);
        assert_eq!(grid.rows, 2 + 1 + 2);
    }

    #[test]
    fn responsive_sizing_rejects_oversized_gaps() {
        let viewport = Viewport::new(1.0, 1.0, 100, 100);
        let layout = LayoutConfig::new(SizingMode::Responsive {
            visible_cols: 4,
            visible_rows: 4,
            gap_x: 0.5,
            gap_y: 0.0,
        });
        assert!(matches!(
            compute_grid_config(&viewport, &layout),
            Err(ConfigError::DegenerateCells { visible: 4, .. })
        ));
    }

    #[test]
    fn degenerate_viewport_rejected() {
        let viewport = Viewport::new(0.0, 5.0, 0, 500);
        assert!(matches!(
            compute_grid_config(&viewport, &fixed(3.0, 0.1)),
            Err(ConfigError::NonPositiveViewport { .. })
        ));
    }

    #[test]
    fn huge_grid_rejected() {
        let viewport = Viewport::new(1e9, 1e9, 1000, 1000);
        assert!(compute_grid_config(&viewport, &fixed(1.0, 0.0)).is_err());
    }

    #[test]
    fn direct_grid_validation() {
        assert!(GridConfig::new(3.0, 3.0, 0.1, 0.1, 4, 10).is_ok());
        assert!(matches!(
            GridConfig::new(3.0, 3.0, 0.1, 0.1, 0, 10),
            Err(ConfigError::ZeroGridDimension { cols: 0, rows: 10 })
        ));
        assert!(GridConfig::new(-3.0, 3.0, 0.1, 0.1, 4, 10).is_err());
    }

    #[test]
    fn direct_grid_rejects_bad_gaps() {
        // a gap of minus one cell would leave a zero stride to wrap by
        assert!(matches!(
            GridConfig::new(1.0, 1.0, -1.0, -1.0, 2, 2),
            Err(ConfigError::InvalidParameter { name: "gap_x", .. })
        ));
        assert!(matches!(
            GridConfig::new(1.0, 1.0, 0.0, -0.5, 2, 2),
            Err(ConfigError::InvalidParameter { name: "gap_y", .. })
        ));
        assert!(GridConfig::new(1.0, 1.0, f64::NAN, 0.0, 2, 2).is_err());

        let grid = GridConfig::new(1.0, 1.0, 0.0, 0.0, 2, 2).unwrap();
        let stride = grid.effective_cell();
        assert!(stride.x > 0.0 && stride.y > 0.0);
    }
}

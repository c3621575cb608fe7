use serde::{Deserialize, Serialize};
use tilefield_common::ConfigError;

/// How cell size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizingMode {
    /// Cells keep a fixed world size; only the cell count follows the viewport.
    Fixed {
        cell_width: f64,
        cell_height: f64,
        gap_x: f64,
        gap_y: f64,
    },
    /// Cells stretch so that `visible_cols` x `visible_rows` fit the viewport
    /// with a gap on every side.
    Responsive {
        visible_cols: u32,
        visible_rows: u32,
        gap_x: f64,
        gap_y: f64,
    },
}

impl Default for SizingMode {
    fn default() -> Self {
        Self::Fixed {
            cell_width: 3.0,
            cell_height: 3.0,
            gap_x: 0.1,
            gap_y: 0.1,
        }
    }
}

/// Vertical scroll multiplier per column. Horizontal speed is always uniform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpeed {
    Uniform,
    /// Even and odd columns scroll at different rates (parallax).
    Alternating { even: f64, odd: f64 },
}

impl Default for ColumnSpeed {
    fn default() -> Self {
        Self::Alternating { even: 1.0, odd: 2.0 }
    }
}

impl ColumnSpeed {
    pub fn speed(&self, col: u32) -> f64 {
        match *self {
            Self::Uniform => 1.0,
            Self::Alternating { even, odd } => {
                if col % 2 == 1 {
                    odd
                } else {
                    even
                }
            }
        }
    }
}

/// Layout tuning: cell sizing plus how the pan offset drives the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sizing: SizingMode,
    /// Multiplier from pan offset to layout travel.
    pub scroll_speed_scale: f64,
    pub column_speed: ColumnSpeed,
    /// Lower bounds on the generated grid. Coverage may require more.
    pub min_cols: u32,
    pub min_rows: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(SizingMode::default())
    }
}

impl LayoutConfig {
    pub fn new(sizing: SizingMode) -> Self {
        Self {
            sizing,
            scroll_speed_scale: 1.0,
            column_speed: ColumnSpeed::default(),
            min_cols: 0,
            min_rows: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.sizing {
            SizingMode::Fixed {
                cell_width,
                cell_height,
                gap_x,
                gap_y,
            } => {
                let ok = cell_width.is_finite()
                    && cell_height.is_finite()
                    && cell_width > 0.0
                    && cell_height > 0.0;
                if !ok {
                    return Err(ConfigError::NonPositiveCellSize {
                        width: cell_width,
                        height: cell_height,
                    });
                }
                validate_gaps(gap_x, gap_y)?;
            }
            SizingMode::Responsive {
                visible_cols,
                visible_rows,
                gap_x,
                gap_y,
            } => {
                if visible_cols == 0 || visible_rows == 0 {
                    return Err(ConfigError::ZeroGridDimension {
                        cols: visible_cols,
                        rows: visible_rows,
                    });
                }
                validate_gaps(gap_x, gap_y)?;
            }
        }

        if !(self.scroll_speed_scale.is_finite() && self.scroll_speed_scale > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "scroll_speed_scale",
                value: self.scroll_speed_scale,
            });
        }
        if let ColumnSpeed::Alternating { even, odd } = self.column_speed {
            for value in [even, odd] {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidParameter {
                        name: "column_speed",
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_gaps(gap_x: f64, gap_y: f64) -> Result<(), ConfigError> {
    for (name, value) in [("gap_x", gap_x), ("gap_y", gap_y)] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ConfigError::InvalidParameter { name, value });
        }
    }
    Ok(())
}

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A grid cell address on the torus: column and row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl CellCoord {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Viewport geometry as reported by the windowing collaborator.
///
/// `width`/`height` are in world units (the orthographic camera extent),
/// `pixel_width`/`pixel_height` are the device pixel size of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            width,
            height,
            pixel_width,
            pixel_height,
        }
    }

    /// Orthographic viewport of fixed world height, widened to the surface aspect.
    pub fn from_pixels(view_height: f64, pixel_width: u32, pixel_height: u32) -> Self {
        let aspect = if pixel_height == 0 {
            0.0
        } else {
            pixel_width as f64 / pixel_height as f64
        };
        Self::new(view_height * aspect, view_height, pixel_width, pixel_height)
    }

    /// World extent as a vector.
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Reject zero, negative, or non-finite sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !world_ok || self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(ConfigError::NonPositiveViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// World units per device pixel.
    ///
    /// Uses the horizontal ratio; both axes share it under an orthographic
    /// camera that preserves aspect.
    pub fn world_per_pixel(&self) -> f64 {
        if self.pixel_width > 0 {
            self.width / self.pixel_width as f64
        } else if self.pixel_height > 0 {
            self.height / self.pixel_height as f64
        } else {
            1.0
        }
    }
}

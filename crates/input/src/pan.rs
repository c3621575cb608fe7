use glam::DVec2;
use serde::{Deserialize, Serialize};
use tilefield_common::ConfigError;

use crate::InputEvent;

/// Tuning for the input accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Multiplier on pixel deltas after pixel-to-world conversion.
    pub sensitivity: f64,
    /// Per-tick velocity retention after release.
    pub decay: f64,
    /// Velocity magnitude below which inertia stops.
    pub velocity_epsilon: f64,
    /// Lerp factor pulling the rendered offset toward the raw offset. `None`
    /// renders the raw offset directly.
    pub smoothing: Option<f64>,
    /// Distance below which the smoothed offset snaps onto the raw offset.
    pub smoothing_epsilon: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            decay: 0.95,
            velocity_epsilon: 1e-4,
            smoothing: None,
            smoothing_epsilon: 1e-4,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "sensitivity",
                value: self.sensitivity,
            });
        }
        if !(0.0..1.0).contains(&self.decay) {
            return Err(ConfigError::InvalidParameter {
                name: "decay",
                value: self.decay,
            });
        }
        if !(self.velocity_epsilon.is_finite() && self.velocity_epsilon > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "velocity_epsilon",
                value: self.velocity_epsilon,
            });
        }
        if let Some(factor) = self.smoothing.filter(|f| !(*f > 0.0 && *f <= 1.0)) {
            return Err(ConfigError::InvalidParameter {
                name: "smoothing",
                value: factor,
            });
        }
        if !(self.smoothing_epsilon.is_finite() && self.smoothing_epsilon > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "smoothing_epsilon",
                value: self.smoothing_epsilon,
            });
        }
        Ok(())
    }
}

/// Pan state owned by the accumulator. All values are in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanState {
    /// Raw accumulated offset, unbounded.
    pub offset: DVec2,
    /// Offset as last rendered. Equals `offset` when smoothing is off.
    pub smoothed: DVec2,
    /// Per-tick displacement applied while coasting.
    pub velocity: DVec2,
    pub dragging: bool,
}

/// Accumulates drag/wheel deltas into a pan offset and coasts it after release.
#[derive(Debug, Clone)]
pub struct PanInput {
    config: InputConfig,
    world_per_pixel: f64,
    state: PanState,
}

impl PanInput {
    pub fn new(config: InputConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            world_per_pixel: 1.0,
            state: PanState::default(),
        })
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn state(&self) -> &PanState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Update the pixel-to-world ratio after a viewport resize.
    ///
    /// Offsets and velocity are already in world units and stay untouched.
    pub fn set_world_per_pixel(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.world_per_pixel = ratio;
        }
    }

    pub fn world_per_pixel(&self) -> f64 {
        self.world_per_pixel
    }

    /// Effective pixel-delta multiplier.
    pub fn scale(&self) -> f64 {
        self.config.sensitivity * self.world_per_pixel
    }

    /// The offset the layout engine should read.
    pub fn layout_offset(&self) -> DVec2 {
        if self.config.smoothing.is_some() {
            self.state.smoothed
        } else {
            self.state.offset
        }
    }

    /// Dispatch a raw input event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::DragStart => self.drag_start(),
            InputEvent::Drag { dx, dy } => self.drag(dx, dy),
            InputEvent::DragEnd | InputEvent::PointerLeave => self.drag_end(),
            InputEvent::Wheel { dx, dy } => self.wheel(dx, dy),
        }
    }

    pub fn drag_start(&mut self) {
        self.state.dragging = true;
        self.state.velocity = DVec2::ZERO;
    }

    /// Screen Y grows downward, world Y upward, so the Y axis is not negated.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let s = self.scale();
        let step = DVec2::new(-dx * s, dy * s);
        self.state.offset += step;
        self.state.velocity = step;
    }

    /// Velocity is kept so the view coasts.
    pub fn drag_end(&mut self) {
        self.state.dragging = false;
        tracing::trace!(
            vx = self.state.velocity.x,
            vy = self.state.velocity.y,
            "drag released"
        );
    }

    /// Wheel deltas move content opposite to the scroll direction on both axes.
    pub fn wheel(&mut self, dx: f64, dy: f64) {
        let s = self.scale();
        let step = DVec2::new(-dx * s, -dy * s);
        self.state.offset += step;
        self.state.velocity = step;
    }

    /// Advance inertia and smoothing by one frame. Returns true if the
    /// rendered offset moved.
    pub fn tick(&mut self) -> bool {
        let before = self.layout_offset();

        if !self.state.dragging && self.state.velocity != DVec2::ZERO {
            self.state.offset += self.state.velocity;
            self.state.velocity *= self.config.decay;
            if self.state.velocity.length() < self.config.velocity_epsilon {
                self.state.velocity = DVec2::ZERO;
            }
        }

        match self.config.smoothing {
            Some(factor) => {
                let pending = self.state.offset - self.state.smoothed;
                if pending.length() < self.config.smoothing_epsilon {
                    self.state.smoothed = self.state.offset;
                } else {
                    self.state.smoothed += pending * factor;
                }
            }
            None => self.state.smoothed = self.state.offset,
        }

        self.layout_offset() != before
    }

    /// True when no drag is active, velocity is zero, and smoothing has converged.
    pub fn is_settled(&self) -> bool {
        !self.state.dragging
            && self.state.velocity == DVec2::ZERO
            && self.state.smoothed == self.state.offset
    }
}

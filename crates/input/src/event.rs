use serde::{Deserialize, Serialize};

/// A raw input event from the gesture collaborator.
///
/// Deltas are in device pixels, before any pixel-to-world conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer pressed on the grid.
    DragStart,
    /// Pointer moved while pressed.
    Drag { dx: f64, dy: f64 },
    /// Pointer released.
    DragEnd,
    /// Pointer left the surface mid-gesture. Handled exactly like `DragEnd`.
    PointerLeave,
    /// Wheel or trackpad scroll. Not gated by dragging.
    Wheel { dx: f64, dy: f64 },
}

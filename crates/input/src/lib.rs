//! Input Accumulator: turns drag and wheel deltas into a running pan offset
//! with inertia.
//!
//! # Invariants
//! - `dragging` is true exactly while a drag gesture is active.
//! - Velocity is zeroed at drag start and does not decay while dragging.
//! - Velocity below `velocity_epsilon` snaps to zero so an idle view stays idle.

pub mod event;
pub mod pan;

pub use event::InputEvent;
pub use pan::{InputConfig, PanInput, PanState};

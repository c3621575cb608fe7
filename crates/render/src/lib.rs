//! Rendering Adapter: renderer-agnostic interface over tile placements.
//!
//! # Invariants
//! - Renderers read placements; they never feed back into pan or layout state.
//! - A tile whose image is not loaded yet is skipped or marked, never waited on.
//!
//! A debug text renderer stands in for a GPU backend; the trait is the seam a
//! real backend plugs into.

mod renderer;

pub use renderer::{
    AllReady, DebugTextRenderer, ImageSource, LoadedImages, RenderView, Renderer, is_visible,
    visible_tiles,
};

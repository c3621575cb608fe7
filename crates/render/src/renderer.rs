use std::collections::BTreeSet;
use std::fmt::Write;

use tilefield_common::Viewport;
use tilefield_layout::{ImageCatalog, TilePlacement};

/// Image load status as seen by the renderer.
///
/// Loading is asynchronous and owned by the host, so any index may still
/// be pending when a frame is drawn.
pub trait ImageSource {
    fn is_ready(&self, index: usize) -> bool;
}

/// Every image counts as loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllReady;

impl ImageSource for AllReady {
    fn is_ready(&self, _index: usize) -> bool {
        true
    }
}

/// Set of image indices whose load has completed.
#[derive(Debug, Clone, Default)]
pub struct LoadedImages {
    loaded: BTreeSet<usize>,
}

impl LoadedImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, index: usize) {
        self.loaded.insert(index);
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl ImageSource for LoadedImages {
    fn is_ready(&self, index: usize) -> bool {
        self.loaded.contains(&index)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub placements: &'a [TilePlacement],
    pub viewport: &'a Viewport,
    pub catalog: &'a ImageCatalog,
}

/// True if any part of the tile rectangle falls inside the viewport.
pub fn is_visible(tile: &TilePlacement, viewport: &Viewport) -> bool {
    let half_tile = tile.size.as_dvec2() / 2.0;
    let half_view = viewport.extent() / 2.0;
    let center = tile.position.as_dvec2();
    (center.x - half_tile.x) < half_view.x
        && (center.x + half_tile.x) > -half_view.x
        && (center.y - half_tile.y) < half_view.y
        && (center.y + half_tile.y) > -half_view.y
}

/// Tiles intersecting the viewport, in placement order.
pub fn visible_tiles<'a>(
    placements: &'a [TilePlacement],
    viewport: &'a Viewport,
) -> impl Iterator<Item = &'a TilePlacement> + 'a {
    placements.iter().filter(move |t| is_visible(t, viewport))
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    type Output;

    /// Render one frame. Tiles whose image is not ready must not block.
    fn render(&self, view: &RenderView<'_>, images: &dyn ImageSource) -> Self::Output;
}

/// Text renderer for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Only list tiles that intersect the viewport.
    pub visible_only: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_only() -> Self {
        Self { visible_only: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView<'_>, images: &dyn ImageSource) -> String {
        let mut out = String::new();
        let visible = visible_tiles(view.placements, view.viewport).count();
        let _ = writeln!(
            out,
            "=== Frame (tiles={}, visible={}, viewport={:.2}x{:.2}) ===",
            view.placements.len(),
            visible,
            view.viewport.width,
            view.viewport.height
        );

        let mut pending = 0;
        for tile in view.placements {
            if self.visible_only && !is_visible(tile, view.viewport) {
                continue;
            }
            let status = if images.is_ready(tile.image_index) {
                ""
            } else {
                pending += 1;
                " (pending)"
            };
            let _ = writeln!(
                out,
                "  [{:>2},{:>2}] pos=({:>7.2}, {:>7.2}) size=({:.2}, {:.2}) image={} {}{}",
                tile.col,
                tile.row,
                tile.position.x,
                tile.position.y,
                tile.size.x,
                tile.size.y,
                tile.image_index,
                view.catalog.resolve(tile.image_index),
                status
            );
        }
        if pending > 0 {
            tracing::debug!(pending, "frame drawn with images still loading");
        }

        out
    }
}

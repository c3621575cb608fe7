use std::collections::VecDeque;
use std::time::{Duration, Instant};

use glam::DVec2;
use tilefield_common::Viewport;
use tilefield_input::{InputEvent, PanInput, PanState};
use tilefield_layout::{
    GridConfig, ImageCatalog, LayoutConfig, TileArena, TilePlacement, compute_grid_config,
};

use crate::{DriverError, EngineConfig, FrameTimer};

/// Whether the view has pending motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Nothing moves; no redraw is requested.
    Idle,
    /// Dragging, coasting, smoothing, or a relayout is pending.
    Active,
}

/// Counters accumulated over the driver's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub ticks: u64,
    pub redraws: u64,
    pub tiles: usize,
    pub last_tick: Duration,
}

/// What one tick hands to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput<'a> {
    pub needs_redraw: bool,
    pub placements: &'a [TilePlacement],
}

/// Owns the pan state, the current grid, and the placement arena, and
/// advances them once per host frame.
///
/// Input events are queued as they arrive and applied at the start of the
/// next [`FrameDriver::tick`].
pub struct FrameDriver {
    input: PanInput,
    layout: LayoutConfig,
    catalog: ImageCatalog,
    viewport: Viewport,
    grid: GridConfig,
    arena: TileArena,
    pending: VecDeque<InputEvent>,
    state: DriverState,
    needs_redraw: bool,
    stats: FrameStats,
    timer: FrameTimer,
}

impl FrameDriver {
    /// Build a driver for the initial viewport. Any invalid configuration
    /// is fatal here.
    pub fn new(config: EngineConfig, viewport: Viewport) -> Result<Self, DriverError> {
        config.validate()?;
        let catalog = config.catalog;
        let mut input = PanInput::new(config.input)?;
        let grid = compute_grid_config(&viewport, &config.layout)?;
        input.set_world_per_pixel(viewport.world_per_pixel());
        let arena = TileArena::new(&grid, &catalog);

        tracing::info!(
            cols = grid.cols,
            rows = grid.rows,
            images = catalog.len(),
            "frame driver ready"
        );

        Ok(Self {
            input,
            layout: config.layout,
            catalog,
            viewport,
            grid,
            arena,
            pending: VecDeque::new(),
            // the first frame has never been drawn
            state: DriverState::Active,
            needs_redraw: false,
            stats: FrameStats::default(),
            timer: FrameTimer::default(),
        })
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push_back(event);
        self.activate("input");
    }

    pub fn push_inputs(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push_input(event);
        }
    }

    /// Replace the grid for a new viewport size.
    ///
    /// On error the previous grid stays in effect and the error is returned.
    /// Pan offset and velocity are never touched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), DriverError> {
        let grid = match compute_grid_config(&viewport, &self.layout) {
            Ok(grid) => grid,
            Err(err) => {
                tracing::warn!(%err, ?viewport, "resize rejected, keeping previous grid");
                return Err(err.into());
            }
        };

        if grid != self.grid {
            self.arena.resize(&grid, &self.catalog);
        }
        self.grid = grid;
        self.viewport = viewport;
        self.input.set_world_per_pixel(viewport.world_per_pixel());
        self.activate("resize");
        Ok(())
    }

    /// Advance one frame: apply queued input, decay inertia, relayout, and
    /// decide whether the host should render.
    pub fn tick(&mut self) -> FrameOutput<'_> {
        let _span = tracing::info_span!("frame_tick", tick = self.stats.ticks).entered();
        let start = Instant::now();

        while let Some(event) = self.pending.pop_front() {
            self.input.apply(event);
        }
        self.input.tick();

        self.needs_redraw = self.state == DriverState::Active;
        if self.needs_redraw {
            let offset = self.layout_offset();
            self.arena
                .relayout(&self.grid, &self.layout.column_speed, offset);
            self.stats.redraws += 1;
        }

        if self.state == DriverState::Active && self.input.is_settled() {
            self.state = DriverState::Idle;
            tracing::debug!("driver idle");
        }

        self.stats.ticks += 1;
        self.stats.tiles = self.arena.len();
        self.stats.last_tick = start.elapsed();
        self.timer.record(self.stats.last_tick);

        tracing::trace!(
            redraw = self.needs_redraw,
            state = ?self.state,
            "tick complete"
        );

        FrameOutput {
            needs_redraw: self.needs_redraw,
            placements: self.arena.placements(),
        }
    }

    /// Tick until the driver goes idle or `max_ticks` elapse. Returns the
    /// number of ticks run.
    pub fn run_until_idle(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks {
            self.tick();
            ticks += 1;
            if self.state == DriverState::Idle {
                break;
            }
        }
        ticks
    }

    /// Offset fed to the layout engine: the rendered pan offset scaled by
    /// the scroll speed.
    pub fn layout_offset(&self) -> DVec2 {
        self.input.layout_offset() * self.layout.scroll_speed_scale
    }

    fn activate(&mut self, reason: &'static str) {
        if self.state == DriverState::Idle {
            tracing::debug!(reason, "driver active");
        }
        self.state = DriverState::Active;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Whether the last tick asked for a render pass.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn placements(&self) -> &[TilePlacement] {
        self.arena.placements()
    }

    pub fn pan_state(&self) -> &PanState {
        self.input.state()
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

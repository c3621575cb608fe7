use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tilefield_common::Viewport;
use tilefield_driver::{DriverState, EngineConfig, FrameDriver};
use tilefield_input::{InputEvent, PanState};
use tilefield_layout::{GridConfig, TilePlacement};
use tilefield_render::{DebugTextRenderer, LoadedImages, RenderView, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilefield-cli", about = "Headless driver for the infinite tile grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Print a preset configuration as YAML
    Config {
        /// Preset name: default, gallery, responsive
        #[arg(short, long, default_value = "default")]
        preset: String,
    },
    /// Replay a scripted gesture and print the resulting frame
    Simulate {
        /// YAML config file (overrides --preset)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Preset name when no config file is given
        #[arg(short, long, default_value = "default")]
        preset: String,
        /// Viewport height in world units
        #[arg(long, default_value = "5")]
        view_height: f64,
        /// Surface width in device pixels
        #[arg(long, default_value = "1600")]
        pixel_width: u32,
        /// Surface height in device pixels
        #[arg(long, default_value = "900")]
        pixel_height: u32,
        /// Drag delta in pixels, released immediately (fling)
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        drag: Option<Vec<f64>>,
        /// Wheel delta in pixels
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        wheel: Option<Vec<f64>>,
        /// Maximum ticks to run
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Number of catalog images to treat as loaded (default: all)
        #[arg(long)]
        loaded: Option<usize>,
        /// Only print tiles that intersect the viewport
        #[arg(long)]
        visible_only: bool,
        /// Emit the final frame as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct FrameReport<'a> {
    ticks: u64,
    redraws: u64,
    idle: bool,
    pan: &'a PanState,
    grid: &'a GridConfig,
    placements: &'a [TilePlacement],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("tilefield-cli v{}", env!("CARGO_PKG_VERSION"));
            let config = EngineConfig::default();
            println!(
                "default catalog: {} images, decay={}, sensitivity={}",
                config.catalog.len(),
                config.input.decay,
                config.input.sensitivity
            );
            println!("presets: default, gallery, responsive");
        }
        Commands::Config { preset } => {
            let config = EngineConfig::preset(&preset)
                .with_context(|| format!("unknown preset '{preset}'"))?;
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            config,
            preset,
            view_height,
            pixel_width,
            pixel_height,
            drag,
            wheel,
            ticks,
            loaded,
            visible_only,
            json,
        } => {
            let engine = match config {
                Some(path) => EngineConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => EngineConfig::preset(&preset)
                    .with_context(|| format!("unknown preset '{preset}'"))?,
            };
            let viewport = Viewport::from_pixels(view_height, pixel_width, pixel_height);
            let mut driver = FrameDriver::new(engine, viewport)?;

            if let Some(d) = drag {
                driver.push_inputs([
                    InputEvent::DragStart,
                    InputEvent::Drag { dx: d[0], dy: d[1] },
                    InputEvent::DragEnd,
                ]);
            }
            if let Some(w) = wheel {
                driver.push_input(InputEvent::Wheel { dx: w[0], dy: w[1] });
            }

            let ran = driver.run_until_idle(ticks);
            let idle = driver.state() == DriverState::Idle;
            tracing::info!(ran, idle, "simulation finished");

            if json {
                let report = FrameReport {
                    ticks: driver.stats().ticks,
                    redraws: driver.stats().redraws,
                    idle,
                    pan: driver.pan_state(),
                    grid: driver.grid(),
                    placements: driver.placements(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let mut images = LoadedImages::new();
            let ready = loaded.unwrap_or(driver.catalog().len());
            for index in 0..ready.min(driver.catalog().len()) {
                images.mark_loaded(index);
            }

            let renderer = DebugTextRenderer { visible_only };
            let view = RenderView {
                placements: driver.placements(),
                viewport: driver.viewport(),
                catalog: driver.catalog(),
            };
            print!("{}", renderer.render(&view, &images));

            let pan = driver.pan_state();
            println!(
                "ticks={} redraws={} state={:?} offset=({:.3}, {:.3}) avg_tick={:?}",
                driver.stats().ticks,
                driver.stats().redraws,
                driver.state(),
                pan.offset.x,
                pan.offset.y,
                driver.timer().average()
            );
        }
    }

    Ok(())
}

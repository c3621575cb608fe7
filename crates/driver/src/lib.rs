//! Frame Driver: per-tick orchestration of input, inertia, and layout.
//!
//! # Invariants
//! - Each tick runs in a fixed order: queued input, decay/smoothing, layout,
//!   redraw decision.
//! - A redraw is requested only while the driver is `Active`.
//! - A rejected resize leaves the previous grid and the pan state untouched.

mod config;
mod driver;
mod error;
mod timer;

pub use config::EngineConfig;
pub use driver::{DriverState, FrameDriver, FrameOutput, FrameStats};
pub use error::DriverError;
pub use timer::FrameTimer;

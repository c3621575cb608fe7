/// Configuration errors shared by every tilefield crate.
///
/// These are fatal at initialization. At runtime (viewport resize) the caller
/// keeps its previous valid state and reports the error instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {width}x{height}")]
    NonPositiveCellSize { width: f64, height: f64 },
    #[error("grid must have at least one column and one row, got {cols}x{rows}")]
    ZeroGridDimension { cols: u32, rows: u32 },
    #[error("image catalog is empty")]
    EmptyCatalog,
    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("viewport must be positive, got {width}x{height}")]
    NonPositiveViewport { width: f64, height: f64 },
    #[error("gaps leave no room for {visible} visible cells in {extent} world units")]
    DegenerateCells { visible: u32, extent: f64 },
}

use crate::Rect;
use thiserror::Error;

/// Configuration errors. All of them are raised before the first trial is scheduled and are
/// terminal for the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The screen has a zero width or height.
    #[error("screen size {width}x{height} has a zero dimension")]
    ZeroScreen { width: u32, height: u32 },
    /// The tile size resolved to zero pixels.
    #[error("tile size resolved to zero pixels")]
    ZeroTileSize,
    /// The tile does not fit on the screen.
    #[error("tile size {tile_size}px exceeds the screen size {width}x{height}")]
    TileLargerThanScreen {
        tile_size: u32,
        width: u32,
        height: u32,
    },
    /// The resolved region is too small to hold a single tile.
    #[error("no {tile_size}px tile fits in region {region}")]
    NoTilesFit { region: Rect, tile_size: u32 },
    /// The schedule was asked to run zero cycles.
    #[error("number of cycles must be at least 1")]
    ZeroCycles,
    /// Each trial needs at least one stimulus frame.
    #[error("frames per trial must be at least 1")]
    ZeroFramesPerTrial,
    /// The centered-tile keyword was combined with other region tokens.
    #[error("region '{spec}' combines 'fullscreen' with other tokens")]
    ExclusiveRegionToken { spec: String },
    /// Viewing distance, display width or tile angle is not a positive finite number.
    #[error("invalid viewing geometry: {field} = {value}")]
    InvalidViewingGeometry { field: &'static str, value: f64 },
}

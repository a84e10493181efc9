//! Geometry and trial scheduling for tiled visual stimulus displays.
//!
//! A run picks a region of the screen from a region specifier, tiles it into equal squares and
//! reveals the tiles one at a time, in a fresh random order on every cycle, while everything else
//! stays masked. Rendering, timing and input are left to the caller: this crate hands out the
//! rects to draw each frame and records which tile was shown when.
//!
//! The pieces are used leaf first:
//!
//! - [`resolve_region`] turns a specifier such as `"tl+tr"` into a pixel [`Rect`].
//! - [`tile_region`] subdivides that rect into a [`TileGrid`] with padding strips and exterior
//!   masks.
//! - [`TrialScheduler`] steps through the randomized schedule frame by frame and produces a
//!   [`TrialSequence`] when every cycle has completed.
//!
//! [`Session`] ties the three together for a [`DisplayContext`] and a [`SessionConfig`].

mod color;
mod config;
mod context;
mod error;
mod grid;
mod id;
mod rect;
mod region;
mod scheduler;
mod session;
mod util;

pub use color::Color;
pub use config::SessionConfig;
pub use context::DisplayContext;
pub use error::ConfigError;
pub use grid::{exterior_masks, tile_region, Side, Strip, Strips, TileGrid};
pub use id::{GridPosition, TileIndex};
pub use rect::Rect;
pub use region::{
    resolve_region, RegionSpec, RegionToken, ScreenSplits, CENTERED_TILE_KEYWORD,
    UNKNOWN_TOKEN_FALLBACK,
};
pub use scheduler::{
    run_schedule, ComplementTable, IndexMap, ScheduleEvent, ScheduleOptions, ScheduleOutcome,
    ScheduleProgress, StimulusPresenter, TrialFrame, TrialRecord, TrialScheduler, TrialSequence,
};
pub use session::Session;
pub use util::{degrees_to_pixels, normalize_point, pixels_per_cm};

//! One validated presentation run: region, tile grid and schedule parameters.
//!
//! # Examples
//!
//! ```rust
//! use stimtile::{DisplayContext, ScheduleEvent, Session, SessionConfig};
//!
//! let context = DisplayContext::new(1920, 1080, 480.0);
//! let config = SessionConfig::default()
//!     .with_region("tl")
//!     .with_tile_size_px(200)
//!     .with_seed(3);
//!
//! let session = Session::new(&context, &config).unwrap();
//! assert_eq!((session.grid().nx(), session.grid().ny()), (4, 2));
//!
//! let mut scheduler = session.scheduler(session.rng()).unwrap();
//! assert!(matches!(scheduler.next_event(false), ScheduleEvent::Frame(_)));
//! assert!(matches!(scheduler.next_event(true), ScheduleEvent::Aborted));
//! ```

use crate::error::ConfigError;
use crate::scheduler::{run_schedule, ScheduleOutcome, StimulusPresenter, TrialScheduler};
use crate::{resolve_region, tile_region, Color, DisplayContext, Rect, SessionConfig, TileGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// A configuration checked against a display, ready to be scheduled.
///
/// All configuration errors surface from [`Session::new`], before any trial starts.
#[derive(Debug, Clone)]
pub struct Session {
    context: DisplayContext,
    config: SessionConfig,
    tile_size: u32,
    grid: TileGrid,
}

impl Session {
    pub fn new(context: &DisplayContext, config: &SessionConfig) -> Result<Self, ConfigError> {
        context.validate()?;
        config.validate()?;

        let tile_size = context.tile_size_px(config)?;
        let (screen_width, screen_height) = context.screen_size();
        let region = resolve_region(&config.region, tile_size, screen_width, screen_height)?;
        let grid = tile_region(screen_width, screen_height, tile_size, region);
        if grid.is_empty() {
            return Err(ConfigError::NoTilesFit { region, tile_size });
        }

        info!(
            "Session on {}x{} screen: region '{}' = {}, {}px tiles, {}x{} grid, {} cycles",
            screen_width,
            screen_height,
            config.region,
            region,
            tile_size,
            grid.nx(),
            grid.ny(),
            config.n_cycles
        );

        Ok(Self {
            context: context.clone(),
            config: config.clone(),
            tile_size,
            grid,
        })
    }

    #[inline]
    pub fn context(&self) -> &DisplayContext {
        &self.context
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.grid.region()
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Background between trials, falling back to `default` when the display has none.
    #[inline]
    pub fn background_or(&self, default: Color) -> Color {
        self.context.background_or(default)
    }

    /// Order generator for this session: seeded from the config, or from entropy if unset.
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// A fresh scheduler over this session's grid using `rng`.
    pub fn scheduler<R: Rng>(&self, rng: R) -> Result<TrialScheduler<'_, R>, ConfigError> {
        TrialScheduler::new(&self.grid, self.config.schedule_options(), rng)
    }

    /// Runs the whole schedule against `presenter` with the session's own generator.
    pub fn run(
        &self,
        presenter: &mut impl StimulusPresenter,
    ) -> Result<ScheduleOutcome, ConfigError> {
        let scheduler = self.scheduler(self.rng())?;
        Ok(run_schedule(scheduler, presenter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TrialFrame;

    fn full_hd() -> DisplayContext {
        DisplayContext::new(1920, 1080, 480.0)
    }

    #[test]
    fn resolves_region_and_grid() {
        let config = SessionConfig::default().with_region("tl").with_tile_size_px(200);
        let session = Session::new(&full_hd(), &config).unwrap();

        assert_eq!(session.region(), Rect::new(0, 0, 960, 540));
        assert_eq!(session.grid().len(), 8);
        assert_eq!(session.tile_size(), 200);
    }

    #[test]
    fn oversized_tile_fails_before_scheduling() {
        let config = SessionConfig::default().with_tile_size_px(1500);
        let error = Session::new(&full_hd(), &config).unwrap_err();

        assert!(matches!(error, ConfigError::TileLargerThanScreen { .. }));
    }

    #[test]
    fn region_too_small_for_a_tile_fails() {
        // The centre third of 1920x1080 is 640x360.
        let config = SessionConfig::default().with_region("c").with_tile_size_px(400);
        let error = Session::new(&full_hd(), &config).unwrap_err();

        assert_eq!(
            error,
            ConfigError::NoTilesFit {
                region: Rect::new(640, 360, 1280, 720),
                tile_size: 400,
            }
        );
    }

    #[test]
    fn invalid_display_is_reported_first() {
        let context = DisplayContext::new(1920, 0, 480.0);
        let config = SessionConfig::default().with_cycles(0);

        assert!(matches!(
            Session::new(&context, &config),
            Err(ConfigError::ZeroScreen { .. })
        ));
    }

    struct AbortAfter {
        frames: usize,
        limit: usize,
    }

    impl StimulusPresenter for AbortAfter {
        fn present(&mut self, _frame: &TrialFrame<'_>) {
            self.frames += 1;
        }

        fn abort_requested(&mut self) -> bool {
            self.frames >= self.limit
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = SessionConfig::default()
            .with_tile_size_px(300)
            .with_cycles(2)
            .with_seed(99);
        let session = Session::new(&full_hd(), &config).unwrap();
        let mut presenter = AbortAfter {
            frames: 0,
            limit: usize::MAX,
        };

        let first = session.run(&mut presenter).unwrap();
        let second = session.run(&mut presenter).unwrap();

        assert!(first.is_completed());
        assert_eq!(first, second);
    }

    #[test]
    fn aborted_run_has_no_sequence() {
        let config = SessionConfig::default().with_tile_size_px(300).with_seed(1);
        let session = Session::new(&full_hd(), &config).unwrap();
        let mut presenter = AbortAfter {
            frames: 0,
            limit: 4,
        };

        let outcome = session.run(&mut presenter).unwrap();

        assert_eq!(outcome, ScheduleOutcome::Aborted);
        assert_eq!(presenter.frames, 4);
    }
}

//! Randomized, repeat-free trial scheduling over the tiles of a [`TileGrid`].
//!
//! Each cycle presents every tile exactly once in a fresh random order. For every trial the
//! scheduler hands out the set of rects to black out (exterior masks, padding strips and every
//! tile except the revealed one) once per stimulus frame. The scheduler does not own a loop or a
//! clock: the rendering backend drives it by calling [`TrialScheduler::next_event`] once per
//! frame, passing whether the user asked to abort.
//!
//! Order is drawn over row-major positions and mapped to the column-major tile array through an
//! [`IndexMap`]; the logged [`TrialSequence`] is in row-major terms.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use stimtile::{tile_region, Rect, ScheduleEvent, ScheduleOptions, TrialScheduler};
//!
//! let grid = tile_region(800, 600, 200, Rect::screen(800, 600));
//! let options = ScheduleOptions::default().with_cycles(2);
//! let mut scheduler = TrialScheduler::new(&grid, options, StdRng::seed_from_u64(7)).unwrap();
//!
//! let sequence = loop {
//!     match scheduler.next_event(false) {
//!         ScheduleEvent::Frame(frame) => assert_eq!(frame.masks.len(), grid.len() - 1),
//!         ScheduleEvent::InterStimulus { .. } => {}
//!         ScheduleEvent::Complete(sequence) => break sequence,
//!         ScheduleEvent::Aborted | ScheduleEvent::Finished => unreachable!(),
//!     }
//! };
//!
//! assert_eq!(sequence.len(), 2 * grid.len());
//! ```

mod index_map;
mod progress;
mod sequence;

pub use index_map::IndexMap;
pub use progress::ScheduleProgress;
pub use sequence::{TrialRecord, TrialSequence};

use crate::error::ConfigError;
use crate::{Color, GridPosition, Rect, TileGrid, TileIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, trace, warn};

/// Scheduling parameters that do not depend on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOptions {
    /// Number of complete passes over all tiles. Default 1.
    pub n_cycles: u32,
    /// Stimulus frames shown per trial. Default 1.
    pub frames_per_trial: u32,
    /// Fill of every masked rect. Default [`Color::BLACK`].
    pub mask_color: Color,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            n_cycles: 1,
            frames_per_trial: 1,
            mask_color: Color::BLACK,
        }
    }
}

impl ScheduleOptions {
    pub fn with_cycles(mut self, n_cycles: u32) -> Self {
        self.n_cycles = n_cycles;
        self
    }

    pub fn with_frames_per_trial(mut self, frames_per_trial: u32) -> Self {
        self.frames_per_trial = frames_per_trial;
        self
    }

    pub fn with_mask_color(mut self, mask_color: Color) -> Self {
        self.mask_color = mask_color;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if self.frames_per_trial == 0 {
            return Err(ConfigError::ZeroFramesPerTrial);
        }
        Ok(())
    }
}

/// For every tile, all other tiles. Built once per run.
///
/// Complements are produced on demand from the tile count, so the table stays constant-size
/// however many tiles the grid has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplementTable {
    tile_count: usize,
}

impl ComplementTable {
    pub fn new(tile_count: usize) -> Self {
        Self { tile_count }
    }

    /// Tiles to mask while `tile` is revealed, in column-major order.
    #[inline]
    pub fn complement(&self, tile: TileIndex) -> impl Iterator<Item = TileIndex> {
        let shown = tile.0.min(self.tile_count);
        (0..shown)
            .chain(shown + 1..self.tile_count)
            .map(TileIndex)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tile_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tile_count == 0
    }
}

/// Everything the renderer needs to draw one stimulus frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialFrame<'a> {
    /// 1-based cycle number.
    pub cycle: u32,
    /// 1-based trial number within the cycle.
    pub trial: usize,
    /// 1-based frame number within the trial.
    pub frame: u32,
    /// Row-major position of the revealed tile.
    pub position: GridPosition,
    /// Column-major index of the revealed tile.
    pub tile: TileIndex,
    /// Bounds of the revealed tile.
    pub tile_rect: Rect,
    /// Rects to fill with `mask_color`: exterior masks, padding strips, then all other tiles.
    pub masks: &'a [Rect],
    pub mask_color: Color,
}

/// What the caller should do next.
#[derive(Debug)]
pub enum ScheduleEvent<'a> {
    /// Draw one stimulus frame.
    Frame(TrialFrame<'a>),
    /// The last frame of a trial was handed out; the caller runs its blank interval now.
    InterStimulus { cycle: u32, trial: usize },
    /// Every cycle finished. Returned once.
    Complete(TrialSequence),
    /// The run was cancelled and its sequence discarded. Returned once.
    Aborted,
    /// A terminal event was already returned.
    Finished,
}

/// How a driven run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    Completed(TrialSequence),
    /// Cancelled before completion. No sequence is produced.
    Aborted,
}

impl ScheduleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ScheduleOutcome::Completed(_))
    }

    pub fn sequence(&self) -> Option<&TrialSequence> {
        match self {
            ScheduleOutcome::Completed(sequence) => Some(sequence),
            ScheduleOutcome::Aborted => None,
        }
    }
}

/// The rendering side of a run, driven by [`run_schedule`].
pub trait StimulusPresenter {
    /// Draws one stimulus frame, blocking until it is on screen if the backend syncs to vblank.
    fn present(&mut self, frame: &TrialFrame<'_>);

    /// Runs the blank interval after a trial.
    fn inter_stimulus(&mut self, _cycle: u32, _trial: usize) {}

    /// Polled once before every event.
    fn abort_requested(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Presenting {
        cycle: u32,
        /// 0-based index into the current cycle's order.
        trial: usize,
        /// Frames already handed out for this trial.
        frames_shown: u32,
    },
    Completing,
    Finished,
}

/// Frame-by-frame driver of a randomized multi-cycle schedule.
///
/// Generic over the random source so tests can inject a seeded generator. The generator is
/// consumed once per cycle.
pub struct TrialScheduler<'g, R> {
    grid: &'g TileGrid,
    index_map: IndexMap,
    complements: ComplementTable,
    options: ScheduleOptions,
    rng: R,
    state: State,
    cycle_order: Vec<GridPosition>,
    masks: Vec<Rect>,
    presented: Vec<GridPosition>,
    progress: ScheduleProgress,
}

impl<'g, R: Rng> TrialScheduler<'g, R> {
    /// Prepares a schedule over `grid`. Fails if the grid has no tiles or `options` are invalid.
    pub fn new(
        grid: &'g TileGrid,
        options: ScheduleOptions,
        rng: R,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        if grid.is_empty() {
            return Err(ConfigError::NoTilesFit {
                region: grid.region(),
                tile_size: grid.tile_size(),
            });
        }

        let tile_count = grid.len();
        let total_trials = tile_count as u64 * options.n_cycles as u64;

        Ok(Self {
            grid,
            index_map: IndexMap::for_grid(grid),
            complements: ComplementTable::new(tile_count),
            options,
            rng,
            state: State::NotStarted,
            cycle_order: Vec::with_capacity(tile_count),
            masks: Vec::with_capacity(tile_count + 8),
            presented: Vec::with_capacity(total_trials as usize),
            progress: ScheduleProgress::new(total_trials),
        })
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        self.grid
    }

    #[inline]
    pub fn index_map(&self) -> &IndexMap {
        &self.index_map
    }

    #[inline]
    pub fn progress(&self) -> ScheduleProgress {
        self.progress
    }

    /// Row-major order of the cycle in progress, empty before the first event.
    #[inline]
    pub fn cycle_order(&self) -> &[GridPosition] {
        &self.cycle_order
    }

    /// Advances the schedule by one event.
    ///
    /// `abort_requested` is the caller's cancellation poll for this frame. When it is set before
    /// the schedule completes, the accumulated sequence is dropped and [`ScheduleEvent::Aborted`]
    /// is returned.
    pub fn next_event(&mut self, abort_requested: bool) -> ScheduleEvent<'_> {
        if self.state == State::Finished {
            return ScheduleEvent::Finished;
        }

        if abort_requested {
            warn!(
                "Schedule aborted after {} of {} trials ({} frames)",
                self.progress.trials_completed,
                self.progress.total_trials,
                self.progress.frames_presented
            );
            self.state = State::Finished;
            self.presented.clear();
            return ScheduleEvent::Aborted;
        }

        if self.state == State::NotStarted {
            self.start_cycle(1);
        }

        let state = self.state;
        match state {
            State::Presenting {
                cycle,
                trial,
                frames_shown,
            } if frames_shown < self.options.frames_per_trial => {
                if frames_shown == 0 {
                    self.prepare_masks(trial);
                }
                self.state = State::Presenting {
                    cycle,
                    trial,
                    frames_shown: frames_shown + 1,
                };
                self.progress.record_frame();

                let position = self.cycle_order[trial];
                let tile = self.index_map.tile_index(position);
                ScheduleEvent::Frame(TrialFrame {
                    cycle,
                    trial: trial + 1,
                    frame: frames_shown + 1,
                    position,
                    tile,
                    tile_rect: self.grid.tiles()[tile.0],
                    masks: &self.masks,
                    mask_color: self.options.mask_color,
                })
            }
            State::Presenting { cycle, trial, .. } => {
                let position = self.cycle_order[trial];
                self.presented.push(position);
                self.progress.record_trial();
                trace!("Cycle {} trial {} showed position {}", cycle, trial + 1, position);

                if trial + 1 < self.cycle_order.len() {
                    self.state = State::Presenting {
                        cycle,
                        trial: trial + 1,
                        frames_shown: 0,
                    };
                } else {
                    self.progress.record_cycle();
                    if cycle < self.options.n_cycles {
                        self.start_cycle(cycle + 1);
                    } else {
                        self.state = State::Completing;
                    }
                }

                ScheduleEvent::InterStimulus {
                    cycle,
                    trial: trial + 1,
                }
            }
            State::Completing => {
                self.state = State::Finished;
                let sequence =
                    TrialSequence::from_positions(&self.presented, &self.index_map, self.grid);
                self.presented = Vec::new();
                info!(
                    "Schedule complete: {} trials over {} cycles",
                    sequence.len(),
                    self.options.n_cycles
                );
                ScheduleEvent::Complete(sequence)
            }
            State::NotStarted | State::Finished => ScheduleEvent::Finished,
        }
    }

    fn start_cycle(&mut self, cycle: u32) {
        self.cycle_order.clear();
        self.cycle_order.extend((1..=self.grid.len()).map(GridPosition));
        self.cycle_order.shuffle(&mut self.rng);
        debug!("Cycle {} order: {:?}", cycle, self.cycle_order);

        self.state = State::Presenting {
            cycle,
            trial: 0,
            frames_shown: 0,
        };
    }

    fn prepare_masks(&mut self, trial: usize) {
        let tile = self.index_map.tile_index(self.cycle_order[trial]);
        let tiles = self.grid.tiles();

        self.masks.clear();
        self.masks.extend(self.grid.fixed_masks());
        self.masks.extend(
            self.complements
                .complement(tile)
                .map(|other| tiles[other.0]),
        );
    }
}

/// Drives `scheduler` to the end, polling `presenter` for cancellation once per event.
///
/// Returns [`ScheduleOutcome::Aborted`] if the presenter cancels, or if `scheduler` had already
/// returned a terminal event before this call.
pub fn run_schedule<R: Rng>(
    mut scheduler: TrialScheduler<'_, R>,
    presenter: &mut impl StimulusPresenter,
) -> ScheduleOutcome {
    loop {
        let abort_requested = presenter.abort_requested();
        match scheduler.next_event(abort_requested) {
            ScheduleEvent::Frame(frame) => presenter.present(&frame),
            ScheduleEvent::InterStimulus { cycle, trial } => presenter.inter_stimulus(cycle, trial),
            ScheduleEvent::Complete(sequence) => return ScheduleOutcome::Completed(sequence),
            ScheduleEvent::Aborted | ScheduleEvent::Finished => return ScheduleOutcome::Aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_region;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_4x2() -> TileGrid {
        tile_region(1920, 1080, 200, Rect::new(0, 0, 960, 540))
    }

    fn scheduler(
        grid: &TileGrid,
        options: ScheduleOptions,
        seed: u64,
    ) -> TrialScheduler<'_, StdRng> {
        TrialScheduler::new(grid, options, StdRng::seed_from_u64(seed)).unwrap()
    }

    /// Collects (position, masks) of every frame and the final sequence.
    fn drain(
        scheduler: &mut TrialScheduler<'_, StdRng>,
    ) -> (Vec<(GridPosition, Vec<Rect>)>, TrialSequence) {
        let mut frames = Vec::new();
        loop {
            match scheduler.next_event(false) {
                ScheduleEvent::Frame(frame) => frames.push((frame.position, frame.masks.to_vec())),
                ScheduleEvent::InterStimulus { .. } => {}
                ScheduleEvent::Complete(sequence) => return (frames, sequence),
                event => panic!("unexpected event {event:?}"),
            }
        }
    }

    #[test]
    fn complement_table_excludes_only_the_shown_tile() {
        let table = ComplementTable::new(4);

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.complement(TileIndex(2)).collect::<Vec<_>>(),
            vec![TileIndex(0), TileIndex(1), TileIndex(3)]
        );
        assert_eq!(
            table.complement(TileIndex(0)).collect::<Vec<_>>(),
            vec![TileIndex(1), TileIndex(2), TileIndex(3)]
        );
        assert_eq!(
            table.complement(TileIndex(3)).collect::<Vec<_>>(),
            vec![TileIndex(0), TileIndex(1), TileIndex(2)]
        );
    }

    #[test]
    fn small_tiles_on_full_hd_schedule_without_quadratic_setup() {
        // 192x108 grid of 10px tiles.
        let grid = tile_region(1920, 1080, 10, Rect::screen(1920, 1080));
        assert_eq!(grid.len(), 20_736);
        let mut scheduler = scheduler(&grid, ScheduleOptions::default(), 2);

        assert_eq!(scheduler.complements.len(), 20_736);
        match scheduler.next_event(false) {
            ScheduleEvent::Frame(frame) => {
                assert_eq!(frame.masks.len(), grid.len() - 1);
                assert!(!frame.masks.contains(&frame.tile_rect));
                let area: u64 = frame.masks.iter().map(Rect::area).sum();
                assert_eq!(area + frame.tile_rect.area(), 1920 * 1080);
            }
            event => panic!("unexpected event {event:?}"),
        }
    }

    #[test]
    fn each_cycle_is_a_permutation() {
        let grid = grid_4x2();
        let mut scheduler = scheduler(&grid, ScheduleOptions::default().with_cycles(3), 11);
        let (_, sequence) = drain(&mut scheduler);

        let positions: Vec<usize> = sequence.positions().map(GridPosition::get).collect();
        assert_eq!(positions.len(), 24);
        for cycle in positions.chunks(8) {
            let mut sorted = cycle.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (1..=8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn masks_cover_everything_but_the_revealed_tile() {
        let grid = grid_4x2();
        let mut scheduler = scheduler(&grid, ScheduleOptions::default(), 3);
        let map = IndexMap::for_grid(&grid);
        let (frames, _) = drain(&mut scheduler);

        let fixed: Vec<Rect> = grid.fixed_masks().collect();
        for (position, masks) in frames {
            let revealed = grid.tile(map.tile_index(position)).unwrap();
            assert_eq!(masks.len(), fixed.len() + grid.len() - 1);
            assert_eq!(&masks[..fixed.len()], fixed.as_slice());
            assert!(!masks.contains(&revealed));
            let area: u64 = masks.iter().map(Rect::area).sum();
            assert_eq!(area + revealed.area(), 1920 * 1080);
        }
    }

    #[test]
    fn emits_one_frame_event_per_stimulus_frame() {
        let grid = grid_4x2();
        let options = ScheduleOptions::default().with_frames_per_trial(3);
        let mut scheduler = scheduler(&grid, options, 5);

        let mut frames_in_trial = Vec::new();
        loop {
            match scheduler.next_event(false) {
                ScheduleEvent::Frame(frame) => {
                    assert_eq!(frame.frame as usize, frames_in_trial.len() + 1);
                    frames_in_trial.push(frame.position);
                }
                ScheduleEvent::InterStimulus { .. } => {
                    assert_eq!(frames_in_trial.len(), 3);
                    assert!(frames_in_trial.iter().all(|p| *p == frames_in_trial[0]));
                    frames_in_trial.clear();
                }
                ScheduleEvent::Complete(_) => break,
                event => panic!("unexpected event {event:?}"),
            }
        }
        assert_eq!(scheduler.progress().frames_presented, 24);
    }

    #[test]
    fn logged_positions_follow_presented_frames() {
        let grid = grid_4x2();
        let mut scheduler = scheduler(&grid, ScheduleOptions::default().with_cycles(2), 9);
        let (frames, sequence) = drain(&mut scheduler);

        let shown: Vec<GridPosition> = frames.into_iter().map(|(position, _)| position).collect();
        assert_eq!(sequence.positions().collect::<Vec<_>>(), shown);
    }

    #[test]
    fn same_seed_same_sequence() {
        let grid = grid_4x2();
        let options = ScheduleOptions::default().with_cycles(4);

        let (_, first) = drain(&mut scheduler(&grid, options, 42));
        let (_, second) = drain(&mut scheduler(&grid, options, 42));

        assert_eq!(first, second);
    }

    #[test]
    fn abort_discards_sequence_and_then_reports_finished() {
        let grid = grid_4x2();
        let mut scheduler = scheduler(&grid, ScheduleOptions::default().with_cycles(2), 1);

        for _ in 0..5 {
            assert!(matches!(
                scheduler.next_event(false),
                ScheduleEvent::Frame(_) | ScheduleEvent::InterStimulus { .. }
            ));
        }
        assert!(matches!(scheduler.next_event(true), ScheduleEvent::Aborted));
        assert!(matches!(scheduler.next_event(false), ScheduleEvent::Finished));
        assert_eq!(scheduler.progress().trials_completed, 2);
    }

    #[test]
    fn abort_is_honoured_between_frames_of_one_trial() {
        let grid = grid_4x2();
        let options = ScheduleOptions::default().with_frames_per_trial(10);
        let mut scheduler = scheduler(&grid, options, 1);

        assert!(matches!(scheduler.next_event(false), ScheduleEvent::Frame(_)));
        assert!(matches!(scheduler.next_event(true), ScheduleEvent::Aborted));
        assert_eq!(scheduler.progress().frames_presented, 1);
        assert_eq!(scheduler.progress().trials_completed, 0);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let grid = tile_region(1920, 1080, 200, Rect::new(0, 0, 100, 100));
        let result =
            TrialScheduler::new(&grid, ScheduleOptions::default(), StdRng::seed_from_u64(0));

        assert!(matches!(
            result,
            Err(ConfigError::NoTilesFit { tile_size: 200, .. })
        ));
    }

    #[test]
    fn zero_cycles_is_rejected() {
        let grid = grid_4x2();
        let options = ScheduleOptions::default().with_cycles(0);
        let result = TrialScheduler::new(&grid, options, StdRng::seed_from_u64(0));

        assert!(matches!(result, Err(ConfigError::ZeroCycles)));
    }

    struct CountingPresenter {
        frames: usize,
        blanks: usize,
        abort_after_frames: Option<usize>,
    }

    impl StimulusPresenter for CountingPresenter {
        fn present(&mut self, _frame: &TrialFrame<'_>) {
            self.frames += 1;
        }

        fn inter_stimulus(&mut self, _cycle: u32, _trial: usize) {
            self.blanks += 1;
        }

        fn abort_requested(&mut self) -> bool {
            self.abort_after_frames.is_some_and(|limit| self.frames >= limit)
        }
    }

    #[test]
    fn run_schedule_completes_without_abort() {
        let grid = grid_4x2();
        let options = ScheduleOptions::default().with_cycles(2).with_frames_per_trial(2);
        let mut presenter = CountingPresenter {
            frames: 0,
            blanks: 0,
            abort_after_frames: None,
        };

        let outcome = run_schedule(scheduler(&grid, options, 8), &mut presenter);

        assert!(outcome.is_completed());
        assert_eq!(outcome.sequence().map(TrialSequence::len), Some(16));
        assert_eq!(presenter.frames, 32);
        assert_eq!(presenter.blanks, 16);
    }

    #[test]
    fn run_schedule_aborts_mid_cycle() {
        let grid = grid_4x2();
        let mut presenter = CountingPresenter {
            frames: 0,
            blanks: 0,
            abort_after_frames: Some(3),
        };

        let scheduler = scheduler(&grid, ScheduleOptions::default(), 8);
        let outcome = run_schedule(scheduler, &mut presenter);

        assert_eq!(outcome, ScheduleOutcome::Aborted);
        assert_eq!(outcome.sequence(), None);
        assert_eq!(presenter.frames, 3);
    }
}

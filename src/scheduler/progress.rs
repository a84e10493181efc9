/// Counters describing how far a schedule has advanced.
///
/// Updated by the scheduler as events are handed out. A frame counts as presented as soon as it
/// is returned to the caller; a trial counts as completed once its inter-stimulus event is
/// returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleProgress {
    /// Stimulus frames handed to the caller.
    pub frames_presented: u64,
    /// Trials whose last frame has been shown.
    pub trials_completed: u64,
    /// Cycles in which every tile has been shown.
    pub cycles_completed: u32,
    /// Number of trials in the whole schedule.
    pub total_trials: u64,
}

impl ScheduleProgress {
    pub(super) fn new(total_trials: u64) -> Self {
        Self {
            total_trials,
            ..Self::default()
        }
    }

    pub(super) fn record_frame(&mut self) {
        self.frames_presented += 1;
    }

    pub(super) fn record_trial(&mut self) {
        self.trials_completed += 1;
    }

    pub(super) fn record_cycle(&mut self) {
        self.cycles_completed += 1;
    }

    /// Fraction of trials completed, in `[0, 1]`.
    pub fn fraction_complete(&self) -> f64 {
        if self.total_trials == 0 {
            return 0.0;
        }

        self.trials_completed as f64 / self.total_trials as f64
    }

    pub fn is_complete(&self) -> bool {
        self.total_trials > 0 && self.trials_completed == self.total_trials
    }
}

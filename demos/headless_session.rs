//! Runs a complete session without a display and prints the realized order.
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless_session -- "tl+tr" 3
//! ```
//!
//! The first argument is the region specifier, the second the number of cycles.
use stimtile::{
    Color, DisplayContext, ScheduleOutcome, Session, SessionConfig, StimulusPresenter, TrialFrame,
};

/// Stands in for a real renderer: counts what it would have drawn.
struct HeadlessPresenter {
    frames: u64,
    masked_pixels: u64,
    blanks: u64,
}

impl StimulusPresenter for HeadlessPresenter {
    fn present(&mut self, frame: &TrialFrame<'_>) {
        self.frames += 1;
        self.masked_pixels += frame.masks.iter().map(|rect| rect.area()).sum::<u64>();
    }

    fn inter_stimulus(&mut self, _cycle: u32, _trial: usize) {
        self.blanks += 1;
    }

    fn abort_requested(&mut self) -> bool {
        false
    }
}

pub fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let region = args.next().unwrap_or_else(|| "full".to_string());
    let n_cycles = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(2);

    // 24" 16:9 panel.
    let context = DisplayContext::new(1920, 1080, 531.0);
    let config = SessionConfig::default()
        .with_region(region)
        .with_tile_degrees(6.0)
        .with_cycles(n_cycles)
        .with_frames_per_trial(30)
        .with_seed(1);

    let session = match Session::new(&context, &config) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            std::process::exit(1);
        }
    };
    println!(
        "region {} tiled with {}px tiles ({}x{}), background {:?}",
        session.region(),
        session.tile_size(),
        session.grid().nx(),
        session.grid().ny(),
        session.background_or(Color::MID_GRAY).to_array(),
    );

    let mut presenter = HeadlessPresenter {
        frames: 0,
        masked_pixels: 0,
        blanks: 0,
    };
    let outcome = match session.run(&mut presenter) {
        Ok(outcome) => outcome,
        Err(error) => {
            eprintln!("Could not start the schedule: {error}");
            std::process::exit(1);
        }
    };

    match outcome {
        ScheduleOutcome::Completed(sequence) => {
            println!("Position\tRow\tColumn\tX\tY");
            for record in sequence.records() {
                println!(
                    "{}\t{}\t{}\t{:.4}\t{:.4}",
                    record.position, record.row, record.column, record.x, record.y
                );
            }
        }
        ScheduleOutcome::Aborted => println!("run aborted, nothing recorded"),
    }
    println!(
        "{} frames, {} blanks, {} masked pixels drawn",
        presenter.frames, presenter.blanks, presenter.masked_pixels
    );
}
